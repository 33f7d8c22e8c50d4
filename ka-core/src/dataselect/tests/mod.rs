
use chrono::DateTime;
use ka_testutils::*;
use rstest::*;

use super::*;
use crate::prelude::*;

fn depl_cells(names: &[&str]) -> Vec<ResourceCell<appsv1::Deployment>> {
    to_cells(names.iter().enumerate().map(|(i, n)| build_deployment(n, i as i64)).collect())
}

fn cell_names<K: CellProperties>(cells: &[ResourceCell<K>]) -> Vec<String> {
    cells.iter().map(|c| c.inner().name_any()).collect()
}

#[rstest]
fn test_cell_round_trip(test_deployment: appsv1::Deployment) {
    let cells = to_cells(vec![test_deployment.clone()]);
    assert_eq!(from_cells(cells), vec![test_deployment]);
}

#[rstest]
fn test_cell_properties(test_deployment: appsv1::Deployment) {
    let cell = ResourceCell::new(test_deployment);
    assert_eq!(cell.identity(), CellId::new(test_uid(TEST_DEPLOYMENT)));
    assert_eq!(cell.property(PropertyName::Name), Some(ComparableValue::Str(TEST_DEPLOYMENT.into())));
    assert_eq!(cell.property(PropertyName::Namespace), Some(ComparableValue::Str(TEST_NAMESPACE.into())));
    assert!(matches!(cell.property(PropertyName::CreationTimestamp), Some(ComparableValue::Time(_))));
    assert_eq!(cell.property(PropertyName::Status), None);

    let sel = cell.selector();
    assert_eq!(sel.kind, "Deployment");
    assert_eq!(sel.namespace.as_deref(), Some(TEST_NAMESPACE));
    assert!(sel.pods.is_empty());
}

#[rstest]
fn test_pod_cell_properties() {
    let cell = ResourceCell::new(build_pod("pod-1", "Failed", None, TEST_POD));
    assert_eq!(cell.property(PropertyName::Status), Some(ComparableValue::Str("Failed".into())));
    assert_eq!(cell.selector().pods, vec!["pod-1"]);
}

#[rstest]
fn test_comparable_value_mixed_types() {
    let s = ComparableValue::Str("zzz".into());
    let t = ComparableValue::Time(DateTime::from_timestamp(0, 0).unwrap());
    assert_eq!(s.compare(&t), std::cmp::Ordering::Less);
    assert_eq!(t.compare(&s), std::cmp::Ordering::Greater);
    assert!(t.contains("1970-01-01"));
    assert!(!t.contains("zzz"));
}
