use std::fmt::Debug;
use std::time::Instant;

use kube::api::{
    Api,
    ListParams,
};
use kube::Resource;
use kube::core::NamespaceResourceScope;
use metrics::{
    counter,
    histogram,
};
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;
use tracing::*;

use super::*;

pub trait ListableResource:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + Sync + 'static
{
}

impl<K> ListableResource for K where
    K: Resource<Scope = NamespaceResourceScope, DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + Sync + 'static
{
}

#[derive(Clone)]
pub struct ResourceFetcher {
    client: kube::Client,
}

impl ResourceFetcher {
    pub fn new(client: kube::Client) -> ResourceFetcher {
        ResourceFetcher { client }
    }

    // Kick off a single list call in the background and hand the result to `readers` independent
    // channels; this never blocks the caller.
    pub fn dispatch<K: ListableResource>(&self, ns: &NamespaceQuery, readers: usize) -> Vec<ResourceChannel<K>> {
        let kind = K::kind(&()).to_string();
        let (senders, channels): (Vec<_>, Vec<_>) = (0..readers).map(|_| ResourceChannel::new(&kind)).unzip();
        self.spawn_list(ns, kind, senders);
        channels
    }

    pub fn dispatch_one<K: ListableResource>(&self, ns: &NamespaceQuery) -> ResourceChannel<K> {
        let kind = K::kind(&()).to_string();
        let (tx, chan) = ResourceChannel::new(&kind);
        self.spawn_list(ns, kind, vec![tx]);
        chan
    }

    fn spawn_list<K: ListableResource>(
        &self,
        ns: &NamespaceQuery,
        kind: String,
        senders: Vec<oneshot::Sender<FetchResult<K>>>,
    ) {
        let api: Api<K> = match ns.request_namespace() {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        tokio::spawn(list_and_send(api, kind, ns.clone(), senders));
    }
}

#[instrument(skip_all, fields(kind = %kind))]
async fn list_and_send<K: ListableResource>(
    api: Api<K>,
    kind: String,
    ns: NamespaceQuery,
    senders: Vec<oneshot::Sender<FetchResult<K>>>,
) {
    let start = Instant::now();
    counter!(FETCH_TOTAL_METRIC, "kind" => kind.clone()).increment(1);

    let result = match api.list(&ListParams::default()).await {
        Ok(list) => {
            let items: Vec<K> = list
                .items
                .into_iter()
                .filter(|obj| ns.matches(obj.meta().namespace.as_deref()))
                .collect();
            debug!("listed {} {kind} objects", items.len());
            Ok(items)
        },
        Err(err) => {
            let err = FetchError::from_kube(&kind, err);
            if err.is_not_found() {
                debug!("{err}");
            } else {
                counter!(FETCH_ERRORS_METRIC, "kind" => kind.clone()).increment(1);
                error!("{err}");
            }
            Err(err)
        },
    };
    histogram!(FETCH_DURATION_METRIC, "kind" => kind.clone()).record(start.elapsed().as_secs_f64());

    for tx in senders {
        if tx.send(result.clone()).is_err() {
            debug!("reader for {kind} went away before the result was ready");
        }
    }
}
