pub mod config;
pub mod constants;
pub mod dataselect;
pub mod errors;
pub mod fetch;
pub mod k8s;
pub mod list;
pub mod logging;
pub mod macros;
pub mod metric;

pub mod prelude {
    pub use k8s_openapi::api::apps::v1 as appsv1;
    pub use k8s_openapi::api::core::v1 as corev1;
    pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
    pub use kube::ResourceExt;

    pub use crate::constants::*;
    pub use crate::errors::EmptyResult;
    pub use crate::k8s::{
        KubeResourceExt,
        PodExt,
        PodOwner,
    };
}
