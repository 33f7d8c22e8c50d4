use std::collections::BTreeMap;
use std::sync::Arc;

use ka_api::{
    ListMeta,
    Metric,
    PodInfo,
};
use tracing::*;

use crate::dataselect::{
    CachedResources,
    CellProperties,
    DataCell,
    DataSelectQuery,
    process,
    to_cells,
};
use crate::fetch::{
    ListableResource,
    ResourceChannels,
};
use crate::k8s::{
    PodAttribution,
    aggregate_status,
    warnings_for,
};
use crate::metric::MetricsBackend;
use crate::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct AssembledList<V> {
    pub list_meta: ListMeta,
    pub items: Vec<V>,
    pub cumulative_metrics: Vec<Metric>,
    pub item_metrics: BTreeMap<String, Vec<Metric>>,
}

impl<V> AssembledList<V> {
    pub fn empty() -> AssembledList<V> {
        AssembledList {
            list_meta: ListMeta::default(),
            items: vec![],
            cumulative_metrics: vec![],
            item_metrics: BTreeMap::new(),
        }
    }
}

/// Read every channel, run the select pipeline, and turn the selected objects into views.
///
/// Channels are read in a fixed order (primary, pods, events, controllers).  If the cluster doesn't
/// serve the primary kind at all, the result is an empty list; any other fetch error fails the whole
/// assembly.  Metric failures never fail the assembly, and never change the items: per-item
/// metrics are returned next to the items, keyed by object UID, and are simply empty on failure.
#[instrument(skip_all, fields(kind = %channels.primary.kind()))]
pub async fn assemble<K, V, F>(
    channels: ResourceChannels<K>,
    query: &DataSelectQuery,
    backend: Option<Arc<dyn MetricsBackend>>,
    to_view: F,
) -> anyhow::Result<AssembledList<V>>
where
    K: ListableResource + PodOwner + CellProperties,
    F: Fn(K, PodInfo) -> V,
{
    info!("assembling list");
    let primary = match channels.primary.recv().await {
        Ok(items) => items,
        Err(err) if err.is_not_found() => {
            info!("{err}, returning an empty list");
            return Ok(AssembledList::empty());
        },
        Err(err) => {
            error!("{err}");
            return Err(err.into());
        },
    };
    let pods = channels.pods.recv().await?;
    let events = channels.events.recv().await?;
    let controllers = match channels.controllers {
        Some(chan) => chan.recv().await?,
        None => vec![],
    };
    debug!(
        "received {} objects, {} pods, {} events, {} controllers",
        primary.len(),
        pods.len(),
        events.len(),
        controllers.len()
    );

    // Attribution runs over the whole primary collection, not just the current page, so that pods
    // are split between parents the same way no matter how the list is paginated.
    let cached = Arc::new(CachedResources::new(PodAttribution::build(&primary, pods, &controllers)));
    let selected = process(to_cells(primary), query, cached.clone(), backend)?;

    let mut items = Vec::with_capacity(selected.cells.len());
    for cell in selected.cells {
        let id = cell.identity();
        let obj = cell.into_inner();
        let pods = cached.pods_for(&id);
        let mut info = aggregate_status(obj.current_replicas(), obj.desired_replicas(), &pods);
        info.warnings = warnings_for(&events, &pods);
        items.push(to_view(obj, info));
    }

    let metrics = selected.metrics.resolve().await.into_metrics();
    let item_metrics = metrics.per_item.into_iter().map(|(id, m)| (id.to_string(), m)).collect();

    Ok(AssembledList {
        list_meta: ListMeta { total_items: selected.total_matched },
        items,
        cumulative_metrics: metrics.cumulative,
        item_metrics,
    })
}

#[cfg(test)]
mod tests;
