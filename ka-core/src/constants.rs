// Kinds
pub const DAEMON_SET_KIND: &str = "DaemonSet";
pub const DEPLOYMENT_KIND: &str = "Deployment";
pub const EVENT_KIND: &str = "Event";
pub const POD_KIND: &str = "Pod";
pub const REPLICA_SET_KIND: &str = "ReplicaSet";
pub const WARNING_EVENT_TYPE: &str = "Warning";

// Pod phases
pub const POD_PHASE_RUNNING: &str = "Running";
pub const POD_PHASE_PENDING: &str = "Pending";
pub const POD_PHASE_SUCCEEDED: &str = "Succeeded";
pub const POD_PHASE_FAILED: &str = "Failed";

// Apiserver status reason for a resource the cluster doesn't serve
pub const NOT_FOUND_REASON: &str = "NotFound";

// Query parameter names
pub const FILTER_BY_PARAM: &str = "filterBy";
pub const SORT_BY_PARAM: &str = "sortBy";
pub const ITEMS_PER_PAGE_PARAM: &str = "itemsPerPage";
pub const PAGE_PARAM: &str = "page";
pub const METRIC_NAMES_PARAM: &str = "metricNames";
pub const AGGREGATIONS_PARAM: &str = "aggregations";

// Filter keys that aren't object properties
pub const HAS_RUNNING_PODS_FILTER: &str = "hasRunningPods";

// Defaults
pub const DEFAULT_METRIC_WINDOW_SECONDS: u64 = 900;

// Operational metric names
pub const FETCH_TOTAL_METRIC: &str = "ka_fetch_total";
pub const FETCH_ERRORS_METRIC: &str = "ka_fetch_errors_total";
pub const FETCH_DURATION_METRIC: &str = "ka_fetch_duration_seconds";
pub const METRIC_DEGRADED_METRIC: &str = "ka_metric_degraded_total";
