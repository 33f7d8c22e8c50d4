mod fetcher_test;

use ka_testutils::*;
use rstest::*;
use tracing_test::traced_test;

use super::*;

#[rstest]
fn test_namespace_query_all() {
    let q = NamespaceQuery::all();
    assert_eq!(q.request_namespace(), None);
    assert!(q.matches(Some(TEST_NAMESPACE)));
    assert!(q.matches(None));
}

#[rstest]
fn test_namespace_query_single() {
    let q = NamespaceQuery::single(TEST_NAMESPACE);
    assert_eq!(q.request_namespace(), Some(TEST_NAMESPACE));
    assert!(q.matches(Some(TEST_NAMESPACE)));
    assert!(!q.matches(Some(TEST_OTHER_NAMESPACE)));
    assert!(!q.matches(None));
}

#[rstest]
fn test_namespace_query_multi() {
    let q = NamespaceQuery::new(vec![
        TEST_OTHER_NAMESPACE.into(),
        TEST_NAMESPACE.into(),
        TEST_NAMESPACE.into(),
        "".into(),
    ]);
    assert_eq!(q.namespaces(), &[TEST_OTHER_NAMESPACE.to_string(), TEST_NAMESPACE.to_string()]);
    assert_eq!(q.request_namespace(), None);
    assert!(q.matches(Some(TEST_OTHER_NAMESPACE)));
    assert!(!q.matches(Some("kube-system")));
}

#[rstest]
#[tokio::test]
async fn test_ready_channel() {
    let chan = ResourceChannel::<corev1::Pod>::ready(POD_KIND, Err(FetchError::NotFound(POD_KIND.into())));
    assert_eq!(chan.kind(), POD_KIND);
    assert!(chan.recv().await.unwrap_err().is_not_found());
}

#[rstest]
#[tokio::test]
async fn test_channel_closed() {
    let (tx, chan) = ResourceChannel::<corev1::Pod>::new(POD_KIND);
    drop(tx);
    assert_eq!(chan.recv().await.unwrap_err(), FetchError::Closed(POD_KIND.into()));
}
