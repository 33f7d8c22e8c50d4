use super::*;

impl PodOwner for appsv1::Deployment {
    fn pod_selector(&self) -> Option<&metav1::LabelSelector> {
        self.spec.as_ref().map(|s| &s.selector)
    }

    fn pod_template(&self) -> Option<&corev1::PodTemplateSpec> {
        self.spec.as_ref().map(|s| &s.template)
    }

    fn desired_replicas(&self) -> Option<i32> {
        self.spec.as_ref()?.replicas
    }

    fn current_replicas(&self) -> i32 {
        self.status.as_ref().and_then(|s| s.replicas).unwrap_or(0)
    }
}

impl PodOwner for appsv1::ReplicaSet {
    fn pod_selector(&self) -> Option<&metav1::LabelSelector> {
        self.spec.as_ref().map(|s| &s.selector)
    }

    fn pod_template(&self) -> Option<&corev1::PodTemplateSpec> {
        self.spec.as_ref()?.template.as_ref()
    }

    fn desired_replicas(&self) -> Option<i32> {
        self.spec.as_ref()?.replicas
    }

    fn current_replicas(&self) -> i32 {
        self.status.as_ref().map(|s| s.replicas).unwrap_or(0)
    }
}

// DaemonSets don't have a replica count; the controller computes the desired number of pods from
// the set of eligible nodes, so we report that instead.
impl PodOwner for appsv1::DaemonSet {
    fn pod_selector(&self) -> Option<&metav1::LabelSelector> {
        self.spec.as_ref().map(|s| &s.selector)
    }

    fn pod_template(&self) -> Option<&corev1::PodTemplateSpec> {
        self.spec.as_ref().map(|s| &s.template)
    }

    fn desired_replicas(&self) -> Option<i32> {
        self.status.as_ref().map(|s| s.desired_number_scheduled)
    }

    fn current_replicas(&self) -> i32 {
        self.status.as_ref().map(|s| s.current_number_scheduled).unwrap_or(0)
    }
}
