use httpmock::prelude::*;
use httpmock::{
    Mock,
    Then,
    When,
};
use serde::Serialize;
use serde_json::json;

pub struct MockServerBuilder {
    server: MockServer,
    handlers: Vec<Box<dyn Fn(When, Then)>>,
    mock_ids: Vec<usize>,
}

fn print_req(req: &HttpMockRequest) -> bool {
    // Use println instead of info! so that this works outside of the lib crate
    println!("    Received: {} {}", req.method(), req.uri().path());
    true
}

impl MockServerBuilder {
    pub fn new() -> MockServerBuilder {
        MockServerBuilder {
            server: MockServer::start(),
            handlers: vec![],
            mock_ids: vec![],
        }
    }

    pub fn assert(&self) {
        for id in &self.mock_ids {
            println!("checking assertions for mock {id}");
            Mock::new(*id, &self.server).assert()
        }
    }

    pub fn handle<F: Fn(When, Then) + 'static>(&mut self, f: F) -> &mut Self {
        self.handlers.push(Box::new(move |w, t| {
            let w = w.matches(print_req);
            f(w, t);
        }));
        self
    }

    pub fn handle_list(&mut self, path: &str, kind: &str, items: Vec<serde_json::Value>) -> &mut Self {
        let path = path.to_string();
        let body = list_body(kind, items);
        self.handle(move |when, then| {
            when.method(GET).path(&path);
            then.json_body(body.clone());
        })
    }

    pub fn handle_not_found(&mut self, path: &str) -> &mut Self {
        let path = path.to_string();
        self.handle(move |when, then| {
            when.path(&path);
            then.status(404).json_body(status_not_found());
        })
    }

    pub fn handle_server_error(&mut self, path: &str) -> &mut Self {
        let path = path.to_string();
        self.handle(move |when, then| {
            when.path(&path);
            then.status(500).json_body(status_internal_error());
        })
    }

    pub fn build(&mut self) {
        for f in self.handlers.iter() {
            self.mock_ids.push(self.server.mock(f).id);
        }

        // Print all unmatched/unhandled requests for easier debugging;
        // this has to go last so that the other mock rules have a chance
        // to match first
        self.server.mock(|when, _| {
            when.matches(print_req);
        });
    }

    pub fn url(&self) -> http::Uri {
        http::Uri::try_from(self.server.url("/")).unwrap()
    }
}

impl Default for MockServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn make_fake_apiserver() -> (MockServerBuilder, kube::Client) {
    let builder = MockServerBuilder::new();
    let config = kube::Config::new(builder.url());
    let client = kube::Client::try_from(config).unwrap();
    (builder, client)
}

pub fn json_items<T: Serialize>(objs: &[T]) -> Vec<serde_json::Value> {
    objs.iter().map(|o| serde_json::to_value(o).unwrap()).collect()
}

pub fn list_body(kind: &str, items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "kind": format!("{kind}List"),
        "apiVersion": "v1",
        "metadata": {"resourceVersion": "1"},
        "items": items,
    })
}

pub fn status_not_found() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "the server could not find the requested resource",
      "reason": "NotFound",
      "code": 404
    })
}

pub fn status_internal_error() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "etcdserver: request timed out",
      "reason": "InternalError",
      "code": 500
    })
}
