use super::*;

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_dispatch_fans_out_one_request() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let depls = [build_deployment("depl-1", 0), build_deployment("depl-2", 1)];
    fake_apiserver.handle_list(DEPLOYMENTS_PATH, "Deployment", json_items(&depls)).build();

    let fetcher = ResourceFetcher::new(client);
    let channels = fetcher.dispatch::<appsv1::Deployment>(&NamespaceQuery::single(TEST_NAMESPACE), 3);
    assert_eq!(channels.len(), 3);

    for chan in channels {
        let items = chan.recv().await.unwrap();
        let names: Vec<_> = items.iter().map(|d| d.name_any()).collect();
        assert_eq!(names, vec!["depl-1", "depl-2"]);
    }

    // Each mock asserts that it was hit exactly once
    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_dispatch_not_found() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle_not_found(DAEMONSETS_PATH).build();

    let fetcher = ResourceFetcher::new(client);
    let err = fetcher
        .dispatch_one::<appsv1::DaemonSet>(&NamespaceQuery::single(TEST_NAMESPACE))
        .recv()
        .await
        .unwrap_err();

    fake_apiserver.assert();
    assert_eq!(err, FetchError::NotFound("DaemonSet".into()));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_dispatch_server_error() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle_server_error(PODS_PATH).build();

    let fetcher = ResourceFetcher::new(client);
    let err = fetcher
        .dispatch_one::<corev1::Pod>(&NamespaceQuery::single(TEST_NAMESPACE))
        .recv()
        .await
        .unwrap_err();

    fake_apiserver.assert();
    assert!(matches!(err, FetchError::Api { code: 500, .. }));
    assert!(!err.is_not_found());
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_dispatch_multi_namespace_filters_client_side() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let mut other = build_deployment("depl-other", 0);
    other.metadata.namespace = Some(TEST_OTHER_NAMESPACE.into());
    let mut system = build_deployment("depl-system", 0);
    system.metadata.namespace = Some("kube-system".into());
    let depls = [build_deployment("depl-1", 0), other, system];
    fake_apiserver
        .handle_list("/apis/apps/v1/deployments", "Deployment", json_items(&depls))
        .build();

    let fetcher = ResourceFetcher::new(client);
    let ns = NamespaceQuery::new(vec![TEST_NAMESPACE.into(), TEST_OTHER_NAMESPACE.into()]);
    let items = fetcher.dispatch_one::<appsv1::Deployment>(&ns).recv().await.unwrap();

    fake_apiserver.assert();
    let names: Vec<_> = items.iter().map(|d| d.name_any()).collect();
    assert_eq!(names, vec!["depl-1", "depl-other"]);
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_resource_channels_without_controllers() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver
        .handle_list(DAEMONSETS_PATH, "DaemonSet", vec![])
        .handle_list(PODS_PATH, "Pod", vec![])
        .handle_list(EVENTS_PATH, "Event", vec![])
        .build();

    let fetcher = ResourceFetcher::new(client);
    let channels: ResourceChannels<appsv1::DaemonSet> =
        ResourceChannels::dispatch(&fetcher, &NamespaceQuery::single(TEST_NAMESPACE), false);
    assert!(channels.controllers.is_none());

    assert!(channels.primary.recv().await.unwrap().is_empty());
    assert!(channels.pods.recv().await.unwrap().is_empty());
    assert!(channels.events.recv().await.unwrap().is_empty());
    fake_apiserver.assert();
}
