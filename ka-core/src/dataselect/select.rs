use std::cmp::Ordering;
use std::sync::Arc;

use tracing::*;

use super::*;
use crate::k8s::{
    PodAttribution,
    PodPhase,
};
use crate::metric::{
    MetricPromise,
    MetricSelector,
    MetricsBackend,
};
use crate::prelude::*;

/// Read-only data the pipeline consults besides the cells themselves: currently the full pod set,
/// already attributed to the objects in the primary collection.
#[derive(Debug, Default)]
pub struct CachedResources {
    attribution: PodAttribution,
}

impl CachedResources {
    pub fn new(attribution: PodAttribution) -> CachedResources {
        CachedResources { attribution }
    }

    pub fn pods_for(&self, id: &CellId) -> Vec<&corev1::Pod> {
        self.attribution.pods_for(id.as_str())
    }

    pub fn running_pods(&self, id: &CellId) -> usize {
        self.pods_for(id).iter().filter(|p| p.phase() == PodPhase::Running).count()
    }

    pub fn pod_names(&self, id: &CellId) -> Vec<String> {
        self.pods_for(id).iter().map(|p| p.name_any()).collect()
    }
}

pub struct SelectResult<C> {
    pub cells: Vec<C>,
    pub metrics: MetricPromise,
    pub total_matched: usize,
}

// filter -> count -> sort -> paginate -> dispatch metrics.  Everything up to the metric dispatch
// happens synchronously, so any problem with the query is reported here and never through the
// metric promise.  Must be called from inside a tokio runtime if metrics are requested.
pub fn process<C: DataCell>(
    cells: Vec<C>,
    query: &DataSelectQuery,
    cached: Arc<CachedResources>,
    backend: Option<Arc<dyn MetricsBackend>>,
) -> anyhow::Result<SelectResult<C>> {
    let received = cells.len();
    let filtered: Vec<C> = cells
        .into_iter()
        .filter(|cell| query.filter.predicates.iter().all(|pred| holds(pred, cell, &cached)))
        .collect();
    let total_matched = filtered.len();

    let sorted = sort_cells(filtered, &query.sort)?;

    let metric_request = match (backend, &query.metrics) {
        (Some(backend), Some(mq)) if !mq.is_empty() => Some((backend, mq.clone())),
        _ => None,
    };
    let cumulative_selectors: Vec<MetricSelector> = if metric_request.is_some() {
        sorted.iter().map(|c| selector_for(c, &cached)).collect()
    } else {
        vec![]
    };

    let page: Vec<C> = match &query.pagination {
        Some(pq) => {
            let range = pq.range(sorted.len());
            sorted.into_iter().skip(range.start).take(range.len()).collect()
        },
        None => sorted,
    };
    debug!("selected {} of {total_matched} matching items ({received} received)", page.len());

    let metrics = match metric_request {
        Some((backend, mq)) => {
            let page_selectors = page.iter().map(|c| selector_for(c, &cached)).collect();
            MetricPromise::dispatch(backend, page_selectors, cumulative_selectors, mq)
        },
        None => MetricPromise::empty(),
    };

    Ok(SelectResult { cells: page, metrics, total_matched })
}

fn holds<C: DataCell>(pred: &FilterPredicate, cell: &C, cached: &CachedResources) -> bool {
    match pred {
        FilterPredicate::Contains { property, value } => cell.property(*property).is_some_and(|v| v.contains(value)),
        FilterPredicate::RunningPods(want) => (cached.running_pods(&cell.identity()) > 0) == *want,
    }
}

// Sort keys are computed once per cell up front, so that a key that some cell can't provide fails
// the whole query before anything is reordered.  sort_by is stable.
fn sort_cells<C: DataCell>(cells: Vec<C>, sort: &SortQuery) -> anyhow::Result<Vec<C>> {
    if sort.sort_by.is_empty() {
        return Ok(cells);
    }

    let mut keyed = Vec::with_capacity(cells.len());
    for cell in cells {
        let mut keys = Vec::with_capacity(sort.sort_by.len());
        for sb in &sort.sort_by {
            match cell.property(sb.property) {
                Some(v) => keys.push(v),
                None => bail!(SelectError::unresolvable_property(sb.property.as_str())),
            }
        }
        keyed.push((keys, cell));
    }

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, &sort.sort_by));
    Ok(keyed.into_iter().map(|(_, cell)| cell).collect())
}

fn compare_keys(a: &[ComparableValue], b: &[ComparableValue], sort_by: &[SortBy]) -> Ordering {
    for ((x, y), sb) in a.iter().zip(b).zip(sort_by) {
        let ord = if sb.ascending { x.compare(y) } else { y.compare(x) };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn selector_for<C: DataCell>(cell: &C, cached: &CachedResources) -> MetricSelector {
    let mut sel = cell.selector();
    if sel.pods.is_empty() {
        sel.pods = cached.pod_names(&sel.id);
    }
    sel
}
