use chrono::{
    DateTime,
    Utc,
};
use k8s_openapi::api::core::v1 as corev1;
use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

// Aggregate information about the pods that belong to some workload.  Desired is optional because
// not every controller has a target replica count (or the count hasn't been set yet).
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodInfo {
    pub current: i32,
    pub desired: Option<i32>,
    pub running: i32,
    pub pending: i32,
    pub failed: i32,
    pub succeeded: i32,
    pub warnings: Vec<Event>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub message: String,
    pub reason: String,

    #[serde(rename = "type")]
    pub type_: String,

    pub count: i32,
    pub object_name: String,
    pub object_namespace: Option<String>,
    pub source_component: Option<String>,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl From<&corev1::Event> for Event {
    fn from(evt: &corev1::Event) -> Self {
        Event {
            message: evt.message.clone().unwrap_or_default(),
            reason: evt.reason.clone().unwrap_or_default(),
            type_: evt.type_.clone().unwrap_or_default(),
            count: evt.count.unwrap_or(1),
            object_name: evt.involved_object.name.clone().unwrap_or_default(),
            object_namespace: evt.involved_object.namespace.clone(),
            source_component: evt.source.as_ref().and_then(|s| s.component.clone()),
            first_seen: evt.first_timestamp.as_ref().map(|t| t.0),
            last_seen: evt.last_timestamp.as_ref().map(|t| t.0),
        }
    }
}
