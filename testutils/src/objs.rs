use std::collections::BTreeMap;

use chrono::DateTime;
use k8s_openapi::api::apps::v1 as appsv1;
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use rstest::fixture;

use crate::constants::*;

pub fn test_uid(name: &str) -> String {
    format!("{name}-uid")
}

pub fn app_labels(app: &str) -> Option<BTreeMap<String, String>> {
    Some(BTreeMap::from([(APP_LABEL_KEY.to_string(), app.to_string())]))
}

pub fn app_selector(app: &str) -> metav1::LabelSelector {
    metav1::LabelSelector { match_labels: app_labels(app), ..Default::default() }
}

pub fn controller_ref(kind: &str, name: &str) -> metav1::OwnerReference {
    metav1::OwnerReference {
        api_version: "apps/v1".into(),
        kind: kind.into(),
        name: name.into(),
        uid: test_uid(name),
        controller: Some(true),
        ..Default::default()
    }
}

pub fn test_object_meta(name: &str, ts: i64) -> metav1::ObjectMeta {
    metav1::ObjectMeta {
        namespace: Some(TEST_NAMESPACE.into()),
        name: Some(name.into()),
        uid: Some(test_uid(name)),
        labels: app_labels(name),
        creation_timestamp: Some(metav1::Time(DateTime::from_timestamp(ts, 0).unwrap())),
        ..Default::default()
    }
}

pub fn test_pod_template(app: &str) -> corev1::PodTemplateSpec {
    corev1::PodTemplateSpec {
        metadata: Some(metav1::ObjectMeta { labels: app_labels(app), ..Default::default() }),
        spec: Some(corev1::PodSpec {
            containers: vec![corev1::Container {
                name: "web".into(),
                image: Some(TEST_IMAGE.into()),
                ..Default::default()
            }],
            init_containers: Some(vec![corev1::Container {
                name: "migrate".into(),
                image: Some(TEST_INIT_IMAGE.into()),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    }
}

#[fixture]
pub fn test_deployment(#[default(TEST_DEPLOYMENT)] name: &str) -> appsv1::Deployment {
    build_deployment(name, 0)
}

pub fn build_deployment(name: &str, ts: i64) -> appsv1::Deployment {
    appsv1::Deployment {
        metadata: test_object_meta(name, ts),
        spec: Some(appsv1::DeploymentSpec {
            replicas: Some(3),
            selector: app_selector(name),
            template: test_pod_template(name),
            ..Default::default()
        }),
        status: Some(appsv1::DeploymentStatus { replicas: Some(3), ..Default::default() }),
    }
}

#[fixture]
pub fn test_replica_set(#[default(TEST_REPLICA_SET)] name: &str) -> appsv1::ReplicaSet {
    build_replica_set(name, None)
}

// The replica set selects on the same app label as its owner, which is how the real deployment
// controller sets things up.
pub fn build_replica_set(name: &str, owner: Option<&appsv1::Deployment>) -> appsv1::ReplicaSet {
    let app = owner.and_then(|o| o.metadata.name.clone()).unwrap_or(name.into());
    let mut metadata = test_object_meta(name, 0);
    metadata.labels = app_labels(&app);
    metadata.owner_references = owner.map(|o| vec![controller_ref("Deployment", o.metadata.name.as_ref().unwrap())]);

    appsv1::ReplicaSet {
        metadata,
        spec: Some(appsv1::ReplicaSetSpec {
            replicas: Some(2),
            selector: app_selector(&app),
            template: Some(test_pod_template(&app)),
            ..Default::default()
        }),
        status: Some(appsv1::ReplicaSetStatus { replicas: 2, ..Default::default() }),
    }
}

#[fixture]
pub fn test_daemonset(#[default(TEST_DAEMONSET)] name: &str) -> appsv1::DaemonSet {
    appsv1::DaemonSet {
        metadata: test_object_meta(name, 0),
        spec: Some(appsv1::DaemonSetSpec {
            selector: app_selector(name),
            template: test_pod_template(name),
            ..Default::default()
        }),
        status: Some(appsv1::DaemonSetStatus {
            desired_number_scheduled: 4,
            current_number_scheduled: 3,
            ..Default::default()
        }),
    }
}

#[fixture]
pub fn test_pod(#[default(TEST_POD)] name: &str) -> corev1::Pod {
    build_pod(name, "Running", None, TEST_POD)
}

// owner is (kind, name) of the controlling object, if any; app is the value of the app label
pub fn build_pod(name: &str, phase: &str, owner: Option<(&str, &str)>, app: &str) -> corev1::Pod {
    let mut metadata = test_object_meta(name, 0);
    metadata.labels = app_labels(app);
    metadata.owner_references = owner.map(|(kind, owner_name)| vec![controller_ref(kind, owner_name)]);

    corev1::Pod {
        metadata,
        spec: Some(corev1::PodSpec { ..Default::default() }),
        status: Some(corev1::PodStatus { phase: Some(phase.into()), ..Default::default() }),
    }
}

pub fn build_event(name: &str, type_: &str, pod: &corev1::Pod) -> corev1::Event {
    corev1::Event {
        metadata: metav1::ObjectMeta {
            namespace: Some(TEST_NAMESPACE.into()),
            name: Some(name.into()),
            ..Default::default()
        },
        involved_object: corev1::ObjectReference {
            kind: Some("Pod".into()),
            namespace: pod.metadata.namespace.clone(),
            name: pod.metadata.name.clone(),
            uid: pod.metadata.uid.clone(),
            ..Default::default()
        },
        type_: Some(type_.into()),
        reason: Some(format!("{name}-reason")),
        message: Some(format!("{name}-message")),
        count: Some(1),
        ..Default::default()
    }
}
