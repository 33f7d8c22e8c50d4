mod daemonset_test;

use std::sync::Arc;

use ka_core::config::AssemblerConfig;
use ka_core::dataselect::DataSelectQuery;
use ka_core::fetch::NamespaceQuery;
use ka_core::metric::MockMetricsBackend;
use ka_core::prelude::*;
use ka_testutils::*;
use tracing_test::traced_test;

use super::*;

fn test_context(client: kube::Client) -> ResourceContext {
    ResourceContext::new(client, AssemblerConfig::default()).with_metrics_backend(None)
}

fn test_ns() -> NamespaceQuery {
    NamespaceQuery::single(TEST_NAMESPACE)
}

#[rstest]
#[tokio::test]
async fn test_context_metrics_backend() {
    let (_, client) = make_fake_apiserver();
    assert!(ResourceContext::new(client.clone(), AssemblerConfig::default()).metrics.is_some());

    let mut config = AssemblerConfig::default();
    config.metrics.enabled = false;
    assert!(ResourceContext::new(client, config).metrics.is_none());
}
