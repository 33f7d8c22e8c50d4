pub const TEST_NAMESPACE: &str = "test-namespace";
pub const TEST_OTHER_NAMESPACE: &str = "other-namespace";
pub const TEST_DEPLOYMENT: &str = "the-deployment";
pub const TEST_REPLICA_SET: &str = "the-replicaset";
pub const TEST_DAEMONSET: &str = "the-daemonset";
pub const TEST_POD: &str = "the-pod";
pub const TEST_IMAGE: &str = "registry.local/web:1.2.3";
pub const TEST_INIT_IMAGE: &str = "registry.local/migrate:1.2.3";
pub const APP_LABEL_KEY: &str = "app";

pub const DEPLOYMENTS_PATH: &str = "/apis/apps/v1/namespaces/test-namespace/deployments";
pub const REPLICA_SETS_PATH: &str = "/apis/apps/v1/namespaces/test-namespace/replicasets";
pub const DAEMONSETS_PATH: &str = "/apis/apps/v1/namespaces/test-namespace/daemonsets";
pub const PODS_PATH: &str = "/api/v1/namespaces/test-namespace/pods";
pub const EVENTS_PATH: &str = "/api/v1/namespaces/test-namespace/events";
pub const POD_METRICS_PATH: &str = "/apis/metrics.k8s.io/v1beta1/namespaces/test-namespace/pods";
