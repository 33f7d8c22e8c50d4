use ka_api::ResourceKind;

use super::*;
use crate::daemonset::*;

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_get_daemon_set_list(test_daemonset: appsv1::DaemonSet) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let pods = [
        build_pod("pod-1", "Running", Some(("DaemonSet", TEST_DAEMONSET)), TEST_DAEMONSET),
        build_pod("pod-2", "Running", Some(("DaemonSet", TEST_DAEMONSET)), TEST_DAEMONSET),
        build_pod("pod-3", "Pending", Some(("DaemonSet", TEST_DAEMONSET)), TEST_DAEMONSET),
    ];
    let events = [build_event("evt", "Warning", &pods[2])];
    fake_apiserver
        .handle_list(DAEMONSETS_PATH, DAEMON_SET_KIND, json_items(&[test_daemonset]))
        .handle_list(PODS_PATH, POD_KIND, json_items(&pods))
        .handle_list(EVENTS_PATH, EVENT_KIND, json_items(&events))
        .build();
    let ctx = test_context(client);

    let list = get_daemon_set_list(&ctx, &test_ns(), DataSelectQuery::new()).await.unwrap();
    fake_apiserver.assert();

    let ds = &list.daemon_sets[0];
    assert_eq!(ds.type_meta.kind, ResourceKind::DaemonSet);
    assert_eq!((ds.pods.current, ds.pods.desired), (3, Some(4)));
    assert_eq!((ds.pods.running, ds.pods.pending), (2, 1));
    assert_eq!(ds.pods.warnings[0].object_name, "pod-3");
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_get_daemon_set_list_not_served() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver
        .handle_not_found(DAEMONSETS_PATH)
        .handle_list(PODS_PATH, POD_KIND, vec![])
        .handle_list(EVENTS_PATH, EVENT_KIND, vec![])
        .build();
    let ctx = test_context(client);

    let list = get_daemon_set_list(&ctx, &test_ns(), DataSelectQuery::new()).await.unwrap();
    assert_eq!(list.list_meta.total_items, 0);
    assert!(list.daemon_sets.is_empty());
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_create_daemon_set_list_invalid_sort(test_daemonset: appsv1::DaemonSet) {
    let query = DataSelectQuery::new().with_sort("a,status".parse().unwrap());
    let res = create_daemon_set_list(vec![test_daemonset], vec![], vec![], query, None).await;
    assert!(res.is_err());
}
