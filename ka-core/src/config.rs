use std::fs::File;
use std::time::Duration;

use ka_api::AggregationMode;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::*;

use crate::dataselect::DataSelectQuery;
use crate::metric::MetricQuery;
use crate::prelude::*;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub metric_names: Vec<String>,
    pub aggregations: Vec<AggregationMode>,
    pub window_seconds: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            enabled: true,
            metric_names: vec![],
            aggregations: vec![AggregationMode::default()],
            window_seconds: DEFAULT_METRIC_WINDOW_SECONDS,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssemblerConfig {
    pub metrics: MetricsConfig,
}

impl AssemblerConfig {
    pub fn load(filename: &str) -> anyhow::Result<AssemblerConfig> {
        Ok(serde_yaml::from_reader(File::open(filename)?)?)
    }

    pub fn default_metric_query(&self) -> Option<MetricQuery> {
        if !self.metrics.enabled || self.metrics.metric_names.is_empty() {
            return None;
        }
        Some(
            MetricQuery::new(self.metrics.metric_names.clone(), self.metrics.aggregations.clone())
                .with_window(Duration::from_secs(self.metrics.window_seconds)),
        )
    }

    // Requests without a metric query get the configured default one; requests with one get the
    // configured window.  If metrics are turned off, nobody gets any.
    pub fn apply(&self, mut query: DataSelectQuery) -> DataSelectQuery {
        if !self.metrics.enabled {
            if query.metrics.take().is_some() {
                debug!("metrics are disabled, ignoring the requested metric query");
            }
            return query;
        }

        query.metrics = match query.metrics {
            Some(mq) => Some(mq.with_window(Duration::from_secs(self.metrics.window_seconds))),
            None => self.default_metric_query(),
        };
        query
    }
}
