mod aggregate;
mod metrics_server;
mod promise;
mod quantity;

use std::time::Duration;

pub use aggregate::{
    aggregate_labeled,
    aggregate_metrics,
};
use async_trait::async_trait;
use ka_api::{
    AggregationMode,
    Metric,
};
pub use metrics_server::MetricsServerBackend;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
pub use promise::{
    MetricPromise,
    MetricsOutcome,
    ResolvedMetrics,
};
pub use quantity::parse_quantity;

use crate::dataselect::CellId;
use crate::errors::*;
use crate::prelude::*;

err_impl! {MetricError,
    #[error("unsupported metric: {0}")]
    UnsupportedMetric(String),

    #[error("malformed quantity: {0}")]
    MalformedQuantity(String),

    #[error("metric task failed: {0}")]
    TaskFailed(String),
}

/// What to download and how to combine it.  Every metric name is reported once per aggregation
/// mode, both for each item on the page and for the filtered collection as a whole.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetricQuery {
    pub metric_names: Vec<String>,
    pub aggregations: Vec<AggregationMode>,
    pub window: Duration,
}

impl MetricQuery {
    pub fn new(metric_names: Vec<String>, aggregations: Vec<AggregationMode>) -> MetricQuery {
        let aggregations = if aggregations.is_empty() { vec![AggregationMode::default()] } else { aggregations };
        MetricQuery {
            metric_names,
            aggregations,
            window: Duration::from_secs(DEFAULT_METRIC_WINDOW_SECONDS),
        }
    }

    pub fn with_window(mut self, window: Duration) -> MetricQuery {
        self.window = window;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.metric_names.is_empty()
    }
}

impl Default for MetricQuery {
    fn default() -> Self {
        MetricQuery::new(vec![], vec![])
    }
}

// Identifies one object whose metrics we want, along with the pods that make it up; backends that
// only know about pods (like metrics-server) use the pod list, others can use the object itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetricSelector {
    pub id: CellId,
    pub namespace: Option<String>,
    pub kind: String,
    pub name: String,
    pub pods: Vec<String>,
}

// One raw (unaggregated) series, tagged with the selector it was downloaded for.  A backend may
// return several series with the same id and metric name, e.g. one per pod.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabeledMetric {
    pub id: CellId,
    pub metric: Metric,
}

#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    async fn download(&self, selectors: Vec<MetricSelector>, query: MetricQuery) -> anyhow::Result<Vec<LabeledMetric>>;
}

#[cfg(test)]
mod tests;
