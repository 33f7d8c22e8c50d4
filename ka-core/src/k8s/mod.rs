mod events;
mod owners;
mod pod_ext;
mod pod_info;
mod util;
mod workloads;

pub use events::warnings_for;
pub use owners::{
    PodAttribution,
    match_pods,
};
pub use pod_info::aggregate_status;
pub use util::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {KubernetesError,
    #[error("field not found in struct: {0}")]
    FieldNotFound(String),

    #[error("malformed label selector: {0:?}")]
    MalformedLabelSelector(metav1::LabelSelectorRequirement),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PodPhase {
    Running,
    Pending,
    Succeeded,
    Failed,
    Unknown,
}

pub trait KubeResourceExt {
    fn namespaced_name(&self) -> String;
    fn stable_id(&self) -> String;
    fn controller_uid(&self) -> Option<&str>;
    fn matches(&self, sel: &metav1::LabelSelector) -> anyhow::Result<bool>;
}

pub trait PodExt {
    fn status(&self) -> anyhow::Result<&corev1::PodStatus>;
    fn phase(&self) -> PodPhase;
}

// Anything that owns pods and can be shown in a workload list: the pods are found through the
// selector (or owner references), and the replica counts feed into the aggregate PodInfo.
pub trait PodOwner: kube::Resource<DynamicType = ()> {
    fn pod_selector(&self) -> Option<&metav1::LabelSelector>;
    fn pod_template(&self) -> Option<&corev1::PodTemplateSpec>;
    fn desired_replicas(&self) -> Option<i32>;
    fn current_replicas(&self) -> i32;
}

#[cfg(test)]
pub mod tests;
