use std::collections::{
    HashMap,
    HashSet,
};

use kube::Resource;
use tracing::*;

use super::*;

// Pod ownership is determined in two steps.  If the pod has a controller owner reference, that
// reference is authoritative: the pod belongs to the referenced object (or, for two-level owners
// like Deployment -> ReplicaSet -> Pod, to whatever owns the referenced controller), and to nothing
// else, even if some other parent's label selector also happens to match the pod.  Only pods with
// no controller reference at all fall back to label-selector matching.
//
// match_pods answers the question for a single parent.  PodAttribution answers it for an entire
// collection of parents at once, and guarantees that every pod is assigned to at most one parent;
// this is what the list assembler uses, so that pod counts across a list never double-count.

pub fn match_pods<'a, P: PodOwner>(
    parent: &P,
    pods: &'a [corev1::Pod],
    controllers: &[appsv1::ReplicaSet],
) -> Vec<&'a corev1::Pod> {
    let parent_uid = parent.stable_id();
    let owned_controllers: HashSet<&str> = controllers
        .iter()
        .filter(|c| c.controller_uid() == Some(parent_uid.as_str()))
        .filter_map(|c| c.meta().uid.as_deref())
        .collect();

    pods.iter()
        .filter(|pod| match pod.controller_uid() {
            Some(uid) => uid == parent_uid || owned_controllers.contains(uid),
            None => selector_matches(parent, pod),
        })
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct PodAttribution {
    pods: Vec<corev1::Pod>,
    owned: HashMap<String, Vec<usize>>,
}

impl PodAttribution {
    pub fn build<P: PodOwner>(parents: &[P], pods: Vec<corev1::Pod>, controllers: &[appsv1::ReplicaSet]) -> Self {
        let parent_ids: HashSet<String> = parents.iter().map(|p| p.stable_id()).collect();

        // Map intermediate controllers to the parent that controls them
        let controller_parents: HashMap<String, String> = controllers
            .iter()
            .filter_map(|c| {
                let parent_id = c.controller_uid()?;
                if !parent_ids.contains(parent_id) {
                    return None;
                }
                Some((c.meta().uid.clone()?, parent_id.to_string()))
            })
            .collect();

        let mut owned: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, pod) in pods.iter().enumerate() {
            let maybe_owner = match pod.controller_uid() {
                Some(uid) if parent_ids.contains(uid) => Some(uid.to_string()),
                Some(uid) => controller_parents.get(uid).cloned(),
                None => parents.iter().find(|p| selector_matches(*p, pod)).map(|p| p.stable_id()),
            };

            if let Some(owner) = maybe_owner {
                owned.entry(owner).or_default().push(i);
            }
        }

        debug!(
            "attributed {} of {} pods to {} parents",
            owned.values().map(|v| v.len()).sum::<usize>(),
            pods.len(),
            owned.len()
        );
        PodAttribution { pods, owned }
    }

    pub fn pods_for(&self, parent_id: &str) -> Vec<&corev1::Pod> {
        self.owned
            .get(parent_id)
            .map(|idxs| idxs.iter().map(|i| &self.pods[*i]).collect())
            .unwrap_or_default()
    }

    pub fn all_pods(&self) -> &[corev1::Pod] {
        &self.pods
    }
}

fn selector_matches<P: PodOwner>(parent: &P, pod: &corev1::Pod) -> bool {
    if parent.namespace() != pod.namespace() {
        return false;
    }

    let Some(sel) = parent.pod_selector() else {
        return false;
    };
    if selector_is_empty(sel) {
        return false;
    }

    pod.matches(sel).unwrap_or_else(|err| {
        warn!("ignoring malformed selector on {}: {err}", parent.namespaced_name());
        false
    })
}
