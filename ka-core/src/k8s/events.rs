use std::collections::HashSet;

use ka_api::Event;

use super::*;

// Events are matched against pods by UID when the event carries one, and by namespace/name
// otherwise (older event sources don't always fill in the UID).
pub fn warnings_for(events: &[corev1::Event], pods: &[&corev1::Pod]) -> Vec<Event> {
    let uids: HashSet<&str> = pods.iter().filter_map(|p| p.metadata.uid.as_deref()).collect();
    let names: HashSet<(Option<&str>, &str)> = pods
        .iter()
        .filter_map(|p| Some((p.metadata.namespace.as_deref(), p.metadata.name.as_deref()?)))
        .collect();

    events
        .iter()
        .filter(|evt| evt.type_.as_deref() == Some(WARNING_EVENT_TYPE))
        .filter(|evt| {
            let obj = &evt.involved_object;
            if obj.kind.as_deref().is_some_and(|k| k != POD_KIND) {
                return false;
            }
            match obj.uid.as_deref() {
                Some(uid) => uids.contains(uid),
                None => obj
                    .name
                    .as_deref()
                    .is_some_and(|name| names.contains(&(obj.namespace.as_deref(), name))),
            }
        })
        .map(Event::from)
        .collect()
}
