use std::sync::Arc;

use ka_core::config::AssemblerConfig;
use ka_core::fetch::ResourceFetcher;
use ka_core::metric::{
    MetricsBackend,
    MetricsServerBackend,
};

// Everything a list request needs besides the request itself.  Cheap to clone.
#[derive(Clone)]
pub struct ResourceContext {
    pub client: kube::Client,
    pub fetcher: ResourceFetcher,
    pub metrics: Option<Arc<dyn MetricsBackend>>,
    pub config: AssemblerConfig,
}

impl ResourceContext {
    pub fn new(client: kube::Client, config: AssemblerConfig) -> ResourceContext {
        let metrics = config
            .metrics
            .enabled
            .then(|| Arc::new(MetricsServerBackend::new(client.clone())) as Arc<dyn MetricsBackend>);

        ResourceContext {
            fetcher: ResourceFetcher::new(client.clone()),
            client,
            metrics,
            config,
        }
    }

    pub fn with_metrics_backend(mut self, backend: Option<Arc<dyn MetricsBackend>>) -> ResourceContext {
        self.metrics = backend;
        self
    }
}
