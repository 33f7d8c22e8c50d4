use std::collections::BTreeMap;

use ka_api::DataPoint;

use super::*;

// Combine several series into one by grouping the data points on timestamp; the result is sorted
// by timestamp no matter what order the inputs were in.
pub fn aggregate_metrics(metric_name: &str, series: &[&Metric], mode: AggregationMode) -> Metric {
    let mut buckets: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for metric in series {
        for dp in &metric.data_points {
            buckets.entry(dp.x).or_default().push(dp.y);
        }
    }

    let data_points = buckets
        .into_iter()
        .map(|(x, ys)| {
            let y = match mode {
                AggregationMode::Sum => ys.iter().sum(),
                AggregationMode::Max => ys.iter().copied().max().unwrap_or_default(),
                AggregationMode::Min => ys.iter().copied().min().unwrap_or_default(),
            };
            DataPoint { x, y }
        })
        .collect();

    Metric::new(metric_name, data_points).with_aggregation(mode)
}

pub fn aggregate_labeled(labeled: &[LabeledMetric], query: &MetricQuery) -> Vec<Metric> {
    let mut metrics = vec![];
    for name in &query.metric_names {
        let series: Vec<&Metric> = labeled
            .iter()
            .filter(|lm| &lm.metric.metric_name == name)
            .map(|lm| &lm.metric)
            .collect();
        for mode in &query.aggregations {
            metrics.push(aggregate_metrics(name, &series, *mode));
        }
    }
    metrics
}
