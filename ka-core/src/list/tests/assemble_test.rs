use ka_api::{
    CPU_USAGE_METRIC,
    DataPoint,
};

use super::*;
use crate::dataselect::FilterQuery;
use crate::metric::{
    LabeledMetric,
    MetricQuery,
    MockMetricsBackend,
};

type Row = (String, PodInfo);

fn to_row<K: ResourceExt>(obj: K, info: PodInfo) -> Row {
    (obj.name_any(), info)
}

fn ready<T>(kind: &str, items: Vec<T>) -> ResourceChannel<T> {
    ResourceChannel::ready(kind, Ok(items))
}

fn rs_channels(rss: Vec<appsv1::ReplicaSet>, pods: Vec<corev1::Pod>, events: Vec<corev1::Event>) -> ResourceChannels<appsv1::ReplicaSet> {
    ResourceChannels {
        primary: ready("ReplicaSet", rss),
        pods: ready(POD_KIND, pods),
        events: ready("Event", events),
        controllers: None,
    }
}

// web-1, db-1, web-2, cache, web-3; each web-N replica set owns one running pod and one pending pod,
// and the first pod of each has a warning event.
fn fixture_channels() -> ResourceChannels<appsv1::ReplicaSet> {
    let names = ["web-1", "db-1", "web-2", "cache", "web-3"];
    let rss = names.iter().map(|n| build_replica_set(n, None)).collect();
    let mut pods = vec![];
    let mut events = vec![];
    for n in names.iter().filter(|n| n.starts_with("web")) {
        let running = build_pod(&format!("{n}-a"), "Running", Some(("ReplicaSet", n)), n);
        events.push(build_event(&format!("{n}-evt"), "Warning", &running));
        events.push(build_event(&format!("{n}-normal"), "Normal", &running));
        pods.push(running);
        pods.push(build_pod(&format!("{n}-b"), "Pending", None, n));
    }
    rs_channels(rss, pods, events)
}

fn web_query(page: usize) -> DataSelectQuery {
    DataSelectQuery::new()
        .with_filter("name,web".parse::<FilterQuery>().unwrap())
        .with_pagination(2, page)
        .unwrap()
}

#[rstest]
#[case::page_0(0, vec!["web-1", "web-2"])]
#[case::page_1(1, vec!["web-3"])]
#[case::page_2(2, vec![])]
#[traced_test]
#[tokio::test]
async fn test_assemble_paginated(#[case] page: usize, #[case] expected: Vec<&str>) {
    let list = assemble(fixture_channels(), &web_query(page), None, to_row).await.unwrap();

    assert_eq!(list.list_meta.total_items, 3);
    let names: Vec<_> = list.items.iter().map(|(name, ..)| name.as_str()).collect();
    assert_eq!(names, expected);
    assert!(list.cumulative_metrics.is_empty());
    assert!(list.item_metrics.is_empty());

    for (name, info) in &list.items {
        assert_eq!(info.current, 2);
        assert_eq!(info.desired, Some(2));
        assert_eq!((info.running, info.pending), (1, 1));
        assert_eq!(info.warnings.len(), 1);
        assert_eq!(info.warnings[0].reason, format!("{name}-evt-reason"));
    }
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_assemble_primary_not_found() {
    let mut channels = fixture_channels();
    channels.primary = ResourceChannel::ready("ReplicaSet", Err(FetchError::NotFound("ReplicaSet".into())));
    // The remaining channels are never read
    channels.pods = ResourceChannel::ready(POD_KIND, Err(FetchError::Closed(POD_KIND.into())));

    let list = assemble(channels, &web_query(0), None, to_row).await.unwrap();
    assert_eq!(list, AssembledList::empty());
    assert_eq!(list.list_meta.total_items, 0);
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_assemble_primary_error() {
    let mut channels = fixture_channels();
    let api_err = FetchError::Api { kind: "ReplicaSet".into(), code: 403, message: "forbidden".into() };
    channels.primary = ResourceChannel::ready("ReplicaSet", Err(api_err.clone()));

    let err = assemble(channels, &web_query(0), None, to_row).await.unwrap_err();
    assert_eq!(err.downcast::<FetchError>().unwrap(), api_err);
}

#[rstest]
#[case::pods(true)]
#[case::events(false)]
#[traced_test]
#[tokio::test]
async fn test_assemble_secondary_error_is_fatal(#[case] fail_pods: bool) {
    let mut channels = fixture_channels();
    if fail_pods {
        channels.pods = ResourceChannel::ready(POD_KIND, Err(FetchError::NotFound(POD_KIND.into())));
    } else {
        let (tx, chan) = ResourceChannel::new("Event");
        drop(tx);
        channels.events = chan;
    }

    let err = assemble(channels, &web_query(0), None, to_row).await.unwrap_err();
    assert!(err.downcast_ref::<FetchError>().is_some());
}

// Every pod reports 5 millicores at x = 60
fn pod_metrics_backend() -> MockMetricsBackend {
    let mut backend = MockMetricsBackend::new();
    backend.expect_download().returning(|sels, _| {
        Ok(sels
            .iter()
            .flat_map(|sel| {
                sel.pods.iter().map(|_| LabeledMetric {
                    id: sel.id.clone(),
                    metric: Metric::new(CPU_USAGE_METRIC, vec![DataPoint { x: 60, y: 5 }]),
                })
            })
            .collect())
    });
    backend
}

fn failing_backend() -> MockMetricsBackend {
    let mut backend = MockMetricsBackend::new();
    backend.expect_download().returning(|_, _| Err(anyhow::anyhow!("connection refused")));
    backend
}

fn cpu_web_query() -> DataSelectQuery {
    web_query(0).with_metrics(MetricQuery::new(vec![CPU_USAGE_METRIC.into()], vec![]))
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_assemble_metrics() {
    let list = assemble(fixture_channels(), &cpu_web_query(), Some(Arc::new(pod_metrics_backend())), to_row)
        .await
        .unwrap();

    // Each web replica set has 2 pods at 5 millicores; there are 3 of them in the filtered set
    assert_eq!(list.cumulative_metrics[0].data_points, vec![DataPoint { x: 60, y: 30 }]);

    // Only the items on the page get per-item metrics
    let ids: Vec<_> = list.item_metrics.keys().map(String::as_str).collect();
    assert_eq!(ids, vec![test_uid("web-1"), test_uid("web-2")]);
    for metrics in list.item_metrics.values() {
        assert_eq!(metrics[0].data_points, vec![DataPoint { x: 60, y: 10 }]);
    }
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_assemble_metric_failure_does_not_change_items() {
    let available = assemble(fixture_channels(), &cpu_web_query(), Some(Arc::new(pod_metrics_backend())), to_row)
        .await
        .unwrap();
    let degraded = assemble(fixture_channels(), &cpu_web_query(), Some(Arc::new(failing_backend())), to_row)
        .await
        .unwrap();

    assert_eq!(degraded.items, available.items);
    assert_eq!(degraded.list_meta, available.list_meta);
    assert!(!available.item_metrics.is_empty());
    assert!(degraded.item_metrics.is_empty());
    assert!(degraded.cumulative_metrics.is_empty());
    assert!(logs_contain("metrics unavailable"));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_assemble_owner_reference_wins(test_deployment: appsv1::Deployment) {
    let mut other = build_deployment("other-depl", 1);
    other.spec.as_mut().unwrap().selector = app_selector(TEST_DEPLOYMENT);

    // The pod is owned (through a replica set) by test_deployment, and other's selector also matches
    // it; it must only be counted once.
    let rs = build_replica_set(TEST_REPLICA_SET, Some(&test_deployment));
    let pod = build_pod(TEST_POD, "Running", Some(("ReplicaSet", TEST_REPLICA_SET)), TEST_DEPLOYMENT);
    let channels = ResourceChannels {
        primary: ready("Deployment", vec![other, test_deployment]),
        pods: ready(POD_KIND, vec![pod]),
        events: ready("Event", vec![]),
        controllers: Some(ready("ReplicaSet", vec![rs])),
    };

    let list = assemble(channels, &DataSelectQuery::new(), None, to_row).await.unwrap();
    let running: Vec<_> = list.items.iter().map(|(name, info)| (name.as_str(), info.running)).collect();
    assert_eq!(running, vec![("other-depl", 0), (TEST_DEPLOYMENT, 1)]);
}
