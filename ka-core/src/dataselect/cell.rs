use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime,
    Utc,
};

use super::*;
use crate::metric::MetricSelector;
use crate::prelude::*;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CellId(String);

impl CellId {
    pub fn new(id: impl Into<String>) -> CellId {
        CellId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PropertyName {
    Name,
    Namespace,
    CreationTimestamp,
    Status,
}

impl PropertyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyName::Name => "name",
            PropertyName::Namespace => "namespace",
            PropertyName::CreationTimestamp => "creationTimestamp",
            PropertyName::Status => "status",
        }
    }
}

impl FromStr for PropertyName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "name" => Ok(PropertyName::Name),
            "namespace" => Ok(PropertyName::Namespace),
            "creationTimestamp" => Ok(PropertyName::CreationTimestamp),
            "status" => Ok(PropertyName::Status),
            _ => Err(SelectError::unknown_property(s)),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ComparableValue {
    Str(String),
    Time(DateTime<Utc>),
}

impl ComparableValue {
    fn rank(&self) -> u8 {
        match self {
            ComparableValue::Str(_) => 0,
            ComparableValue::Time(_) => 1,
        }
    }

    // Values of different types never come from the same property, but we still need a total
    // order for them, so they're ordered by type.
    pub fn compare(&self, other: &ComparableValue) -> Ordering {
        match (self, other) {
            (ComparableValue::Str(a), ComparableValue::Str(b)) => a.cmp(b),
            (ComparableValue::Time(a), ComparableValue::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        match self {
            ComparableValue::Str(s) => s.contains(needle),
            ComparableValue::Time(t) => t.to_rfc3339().contains(needle),
        }
    }
}

/// The uniform interface the select pipeline works on.
///
/// A cell has a stable identity (used to correlate metrics and pods back to it), a set of named
/// properties that can be sorted and filtered on, and a selector describing how to fetch its
/// metrics.  `property` returns `None` when the cell doesn't have that property at all.
pub trait DataCell: Send + Sync + 'static {
    fn identity(&self) -> CellId;
    fn property(&self, name: PropertyName) -> Option<ComparableValue>;
    fn selector(&self) -> MetricSelector;
}

// Per-kind hooks for ResourceCell; the common metadata properties are handled generically.
pub trait CellProperties: kube::Resource<DynamicType = ()> + Send + Sync + 'static {
    fn extra_property(&self, _name: PropertyName) -> Option<ComparableValue> {
        None
    }

    fn metric_pods(&self) -> Vec<String> {
        vec![]
    }
}

impl CellProperties for appsv1::Deployment {}
impl CellProperties for appsv1::ReplicaSet {}
impl CellProperties for appsv1::DaemonSet {}

impl CellProperties for corev1::Pod {
    fn extra_property(&self, name: PropertyName) -> Option<ComparableValue> {
        match name {
            PropertyName::Status => Some(ComparableValue::Str(self.phase().as_str().into())),
            _ => None,
        }
    }

    fn metric_pods(&self) -> Vec<String> {
        vec![self.name_any()]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceCell<K>(K);

impl<K> ResourceCell<K> {
    pub fn new(obj: K) -> ResourceCell<K> {
        ResourceCell(obj)
    }

    pub fn inner(&self) -> &K {
        &self.0
    }

    pub fn into_inner(self) -> K {
        self.0
    }
}

impl<K: CellProperties> DataCell for ResourceCell<K> {
    fn identity(&self) -> CellId {
        CellId::new(self.0.stable_id())
    }

    fn property(&self, name: PropertyName) -> Option<ComparableValue> {
        match name {
            PropertyName::Name => Some(ComparableValue::Str(self.0.name_any())),
            PropertyName::Namespace => Some(ComparableValue::Str(self.0.namespace().unwrap_or_default())),
            PropertyName::CreationTimestamp => self.0.creation_timestamp().map(|t| ComparableValue::Time(t.0)),
            _ => self.0.extra_property(name),
        }
    }

    fn selector(&self) -> MetricSelector {
        MetricSelector {
            id: self.identity(),
            namespace: self.0.namespace(),
            kind: K::kind(&()).into(),
            name: self.0.name_any(),
            pods: self.0.metric_pods(),
        }
    }
}

pub fn to_cells<K>(objs: Vec<K>) -> Vec<ResourceCell<K>> {
    objs.into_iter().map(ResourceCell::new).collect()
}

pub fn from_cells<K>(cells: Vec<ResourceCell<K>>) -> Vec<K> {
    cells.into_iter().map(ResourceCell::into_inner).collect()
}
