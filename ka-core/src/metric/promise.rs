use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use metrics::counter;
use tokio::task::{
    JoinError,
    JoinHandle,
};
use tracing::*;

use super::*;

type MetricTask = JoinHandle<anyhow::Result<Vec<Metric>>>;

/// Handle to metric downloads that are running in the background.
///
/// One task is started for every item on the current page, plus one for the whole filtered
/// collection (the "cumulative" metrics).  Nothing is awaited until `get_metrics` or `resolve`
/// is called, so the caller can do other work (like correlating pods) in the meantime.
#[derive(Debug, Default)]
pub struct MetricPromise {
    cumulative: Option<MetricTask>,
    per_item: Vec<(CellId, MetricTask)>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedMetrics {
    pub cumulative: Vec<Metric>,
    pub per_item: HashMap<CellId, Vec<Metric>>,
}

#[derive(Debug)]
pub enum MetricsOutcome {
    Available(ResolvedMetrics),
    Degraded { reason: String },
}

impl MetricsOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, MetricsOutcome::Degraded { .. })
    }

    // A degraded outcome turns into explicitly-empty metrics
    pub fn into_metrics(self) -> ResolvedMetrics {
        match self {
            MetricsOutcome::Available(metrics) => metrics,
            MetricsOutcome::Degraded { .. } => ResolvedMetrics::default(),
        }
    }
}

impl MetricPromise {
    pub fn empty() -> MetricPromise {
        MetricPromise::default()
    }

    pub fn dispatch(
        backend: Arc<dyn MetricsBackend>,
        page: Vec<MetricSelector>,
        filtered: Vec<MetricSelector>,
        query: MetricQuery,
    ) -> MetricPromise {
        debug!("dispatching metric requests for {} items ({} total)", page.len(), filtered.len());
        let per_item = page
            .into_iter()
            .map(|sel| {
                let id = sel.id.clone();
                let (backend, query) = (backend.clone(), query.clone());
                let task = tokio::spawn(async move { download_and_aggregate(backend.as_ref(), vec![sel], &query).await });
                (id, task)
            })
            .collect();

        let cumulative =
            tokio::spawn(async move { download_and_aggregate(backend.as_ref(), filtered, &query).await });
        MetricPromise { cumulative: Some(cumulative), per_item }
    }

    // Waits for every outstanding request, even if some of them have already failed, and then
    // reports the first failure.
    pub async fn get_metrics(self) -> anyhow::Result<ResolvedMetrics> {
        let MetricPromise { cumulative, per_item } = self;
        let (ids, tasks): (Vec<_>, Vec<_>) = per_item.into_iter().unzip();

        let cumulative_task = async {
            match cumulative {
                Some(task) => flatten(task.await),
                None => Ok(vec![]),
            }
        };
        let (cumulative_res, per_item_res) = tokio::join!(cumulative_task, join_all(tasks));

        let mut per_item = HashMap::new();
        for (id, res) in ids.into_iter().zip(per_item_res) {
            per_item.insert(id, flatten(res)?);
        }
        Ok(ResolvedMetrics { cumulative: cumulative_res?, per_item })
    }

    pub async fn resolve(self) -> MetricsOutcome {
        match self.get_metrics().await {
            Ok(metrics) => MetricsOutcome::Available(metrics),
            Err(err) => {
                warn!("metrics unavailable, continuing without them: {err:#}");
                counter!(METRIC_DEGRADED_METRIC).increment(1);
                MetricsOutcome::Degraded { reason: err.to_string() }
            },
        }
    }
}

async fn download_and_aggregate(
    backend: &dyn MetricsBackend,
    selectors: Vec<MetricSelector>,
    query: &MetricQuery,
) -> anyhow::Result<Vec<Metric>> {
    if selectors.is_empty() {
        return Ok(vec![]);
    }
    let labeled = backend.download(selectors, query.clone()).await?;
    Ok(aggregate_labeled(&labeled, query))
}

fn flatten(res: Result<anyhow::Result<Vec<Metric>>, JoinError>) -> anyhow::Result<Vec<Metric>> {
    res.map_err(|err| MetricError::task_failed(&err.to_string()))?
}
