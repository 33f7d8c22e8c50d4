
use ka_api::{
    CPU_USAGE_METRIC,
    DataPoint,
};
use ka_testutils::TEST_NAMESPACE;
use rstest::*;
use tracing_test::traced_test;

use super::*;

#[rstest]
#[case::plain("2", 2.0)]
#[case::milli("250m", 0.25)]
#[case::nano("1500000n", 0.0015)]
#[case::micro("20u", 0.00002)]
#[case::kilo("3k", 3000.0)]
#[case::mega("5M", 5e6)]
#[case::exa("1E", 1e18)]
#[case::kibi("1Ki", 1024.0)]
#[case::mebi("64Mi", 67108864.0)]
#[case::gibi("2Gi", 2147483648.0)]
#[case::exponent("1e3", 1000.0)]
#[case::fraction("0.5", 0.5)]
fn test_parse_quantity(#[case] q: &str, #[case] expected: f64) {
    let val = parse_quantity(q).unwrap();
    assert!((val - expected).abs() <= expected.abs() * 1e-9, "{q}: {val} != {expected}");
}

#[rstest]
#[case::empty("")]
#[case::suffix_only("Mi")]
#[case::garbage("lots")]
#[case::infinite("inf")]
fn test_parse_quantity_malformed(#[case] q: &str) {
    let err = parse_quantity(q).unwrap_err().downcast().unwrap();
    assert!(matches!(err, MetricError::MalformedQuantity(_)));
}

#[rstest]
fn test_metric_query_defaults_to_sum() {
    let q = MetricQuery::new(vec![CPU_USAGE_METRIC.into()], vec![]);
    assert_eq!(q.aggregations, vec![AggregationMode::Sum]);
    assert_eq!(q.window, Duration::from_secs(DEFAULT_METRIC_WINDOW_SECONDS));
    assert!(!q.is_empty());
    assert!(MetricQuery::default().is_empty());
}

fn series(name: &str, points: &[(i64, i64)]) -> Metric {
    Metric::new(name, points.iter().map(|(x, y)| DataPoint { x: *x, y: *y }).collect())
}

fn labeled(id: &str, name: &str, points: &[(i64, i64)]) -> LabeledMetric {
    LabeledMetric { id: CellId::new(id), metric: series(name, points) }
}

fn selector(id: &str, pods: &[&str]) -> MetricSelector {
    MetricSelector {
        id: CellId::new(id),
        namespace: Some(TEST_NAMESPACE.into()),
        kind: "Deployment".into(),
        name: id.into(),
        pods: pods.iter().map(|p| p.to_string()).collect(),
    }
}
