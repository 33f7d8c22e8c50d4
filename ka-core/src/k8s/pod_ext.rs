use super::*;

impl PodExt for corev1::Pod {
    fn status(&self) -> anyhow::Result<&corev1::PodStatus> {
        match self.status.as_ref() {
            None => bail!(KubernetesError::field_not_found("pod status")),
            Some(ps) => Ok(ps),
        }
    }

    // Pods that haven't been scheduled yet may not have a status at all; the apiserver reports
    // those as Pending, so we do the same.
    fn phase(&self) -> PodPhase {
        let Ok(status) = self.status() else {
            return PodPhase::Pending;
        };

        match status.phase.as_deref() {
            Some(POD_PHASE_RUNNING) => PodPhase::Running,
            Some(POD_PHASE_PENDING) | None => PodPhase::Pending,
            Some(POD_PHASE_SUCCEEDED) => PodPhase::Succeeded,
            Some(POD_PHASE_FAILED) => PodPhase::Failed,
            Some(_) => PodPhase::Unknown,
        }
    }
}

impl PodPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PodPhase::Running => POD_PHASE_RUNNING,
            PodPhase::Pending => POD_PHASE_PENDING,
            PodPhase::Succeeded => POD_PHASE_SUCCEEDED,
            PodPhase::Failed => POD_PHASE_FAILED,
            PodPhase::Unknown => "Unknown",
        }
    }
}
