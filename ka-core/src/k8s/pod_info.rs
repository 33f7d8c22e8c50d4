use ka_api::PodInfo;

use super::*;

pub fn aggregate_status(current: i32, desired: Option<i32>, pods: &[&corev1::Pod]) -> PodInfo {
    let mut info = PodInfo { current, desired, ..Default::default() };
    for pod in pods {
        match pod.phase() {
            PodPhase::Running => info.running += 1,
            PodPhase::Pending => info.pending += 1,
            PodPhase::Failed => info.failed += 1,
            PodPhase::Succeeded => info.succeeded += 1,
            PodPhase::Unknown => (),
        }
    }
    info
}
