use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    ListMeta,
    Metric,
    ObjectMeta,
    PodInfo,
    TypeMeta,
};

// Every workload view has the same shape: the object metadata, aggregate info about the pods it
// owns, and the images it runs.  Metrics are not part of the view; they live on the list, keyed
// by object UID, so that a metrics outage never changes the items themselves.
macro_rules! workload_view {
    ($(#[$meta:meta])* $view:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $view {
            pub object_meta: ObjectMeta,
            pub type_meta: TypeMeta,
            pub pods: PodInfo,
            pub container_images: Vec<String>,

            #[serde(default, skip_serializing_if = "Vec::is_empty")]
            pub init_container_images: Vec<String>,
        }
    };
}

workload_view! {
    /// A Deployment plus the data we can correlate from other sources (pods, events, metrics).
    Deployment
}

workload_view! {
    /// A ReplicaSet plus the data we can correlate from other sources (pods, events, metrics).
    ReplicaSet
}

workload_view! {
    /// A DaemonSet plus the data we can correlate from other sources (pods, events, metrics).
    DaemonSet
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentList {
    pub list_meta: ListMeta,
    pub deployments: Vec<Deployment>,
    pub cumulative_metrics: Vec<Metric>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub item_metrics: BTreeMap<String, Vec<Metric>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSetList {
    pub list_meta: ListMeta,
    pub replica_sets: Vec<ReplicaSet>,
    pub cumulative_metrics: Vec<Metric>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub item_metrics: BTreeMap<String, Vec<Metric>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetList {
    pub list_meta: ListMeta,
    pub daemon_sets: Vec<DaemonSet>,
    pub cumulative_metrics: Vec<Metric>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub item_metrics: BTreeMap<String, Vec<Metric>>,
}
