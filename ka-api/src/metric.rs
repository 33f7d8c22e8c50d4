use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime,
    Utc,
};
use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

pub const CPU_USAGE_METRIC: &str = "cpu/usage_rate";
pub const MEMORY_USAGE_METRIC: &str = "memory/usage";

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Sum,
    Max,
    Min,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::Sum => "sum",
            AggregationMode::Max => "max",
            AggregationMode::Min => "min",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(AggregationMode::Sum),
            "max" => Ok(AggregationMode::Max),
            "min" => Ok(AggregationMode::Min),
            _ => Err(format!("unknown aggregation mode: {s}")),
        }
    }
}

// x is a unix timestamp in seconds; y is the metric value at that time
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct DataPoint {
    pub x: i64,
    pub y: i64,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub value: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub data_points: Vec<DataPoint>,
    pub metric_points: Vec<MetricPoint>,
    pub metric_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationMode>,
}

impl Metric {
    pub fn new(metric_name: &str, data_points: Vec<DataPoint>) -> Metric {
        let metric_points = data_points
            .iter()
            .filter_map(|dp| {
                Some(MetricPoint {
                    timestamp: DateTime::from_timestamp(dp.x, 0)?,
                    value: dp.y.max(0) as u64,
                })
            })
            .collect();

        Metric {
            data_points,
            metric_points,
            metric_name: metric_name.into(),
            aggregation: None,
        }
    }

    pub fn with_aggregation(mut self, mode: AggregationMode) -> Metric {
        self.aggregation = Some(mode);
        self
    }
}
