use std::collections::{
    BTreeMap,
    BTreeSet,
    HashMap,
};

use chrono::{
    DateTime,
    TimeDelta,
    Utc,
};
use ka_api::{
    CPU_USAGE_METRIC,
    DataPoint,
    MEMORY_USAGE_METRIC,
};
use kube::api::{
    Api,
    ApiResource,
    DynamicObject,
    ListParams,
};
use serde::Deserialize;
use tracing::*;

use super::*;

const METRICS_GROUP: &str = "metrics.k8s.io";
const METRICS_VERSION: &str = "v1beta1";
const POD_METRICS_KIND: &str = "PodMetrics";
const POD_METRICS_PLURAL: &str = "pods";

#[derive(Debug, Deserialize)]
struct PodMetricsData {
    timestamp: DateTime<Utc>,

    #[serde(default)]
    containers: Vec<ContainerMetrics>,
}

#[derive(Debug, Deserialize)]
struct ContainerMetrics {
    #[serde(default)]
    usage: BTreeMap<String, String>,
}

#[derive(Debug)]
struct PodSample {
    timestamp: DateTime<Utc>,
    cpu_millis: i64,
    memory_bytes: i64,
}

// metrics-server only keeps the most recent sample for each pod, so every series we return has (at
// most) one point.  Samples older than the query window, measured back from the newest sample we
// got, are considered stale and dropped; the rest are all reported at the newest timestamp so that
// they line up when they're aggregated.
#[derive(Clone)]
pub struct MetricsServerBackend {
    client: kube::Client,
    resource: ApiResource,
}

impl MetricsServerBackend {
    pub fn new(client: kube::Client) -> MetricsServerBackend {
        MetricsServerBackend {
            client,
            resource: ApiResource {
                group: METRICS_GROUP.into(),
                version: METRICS_VERSION.into(),
                api_version: format!("{METRICS_GROUP}/{METRICS_VERSION}"),
                kind: POD_METRICS_KIND.into(),
                plural: POD_METRICS_PLURAL.into(),
            },
        }
    }

    async fn list_samples(&self, ns: &str) -> anyhow::Result<HashMap<String, PodSample>> {
        let api: Api<DynamicObject> = Api::namespaced_with(self.client.clone(), ns, &self.resource);
        let list = api.list(&ListParams::default()).await?;

        let mut samples = HashMap::new();
        for obj in list.items {
            let pod_name = obj.name_any();
            let data: PodMetricsData = serde_json::from_value(obj.data)?;

            let (mut cpu, mut memory) = (0.0, 0.0);
            for container in &data.containers {
                if let Some(q) = container.usage.get("cpu") {
                    cpu += parse_quantity(q)?;
                }
                if let Some(q) = container.usage.get("memory") {
                    memory += parse_quantity(q)?;
                }
            }

            samples.insert(
                pod_name,
                PodSample {
                    timestamp: data.timestamp,
                    cpu_millis: (cpu * 1000.0).round() as i64,
                    memory_bytes: memory.round() as i64,
                },
            );
        }
        Ok(samples)
    }
}

#[async_trait]
impl MetricsBackend for MetricsServerBackend {
    async fn download(&self, selectors: Vec<MetricSelector>, query: MetricQuery) -> anyhow::Result<Vec<LabeledMetric>> {
        if let Some(name) = query
            .metric_names
            .iter()
            .find(|name| *name != CPU_USAGE_METRIC && *name != MEMORY_USAGE_METRIC)
        {
            bail!(MetricError::unsupported_metric(name));
        }

        let namespaces: BTreeSet<&str> = selectors.iter().filter_map(|sel| sel.namespace.as_deref()).collect();
        let mut samples: HashMap<&str, HashMap<String, PodSample>> = HashMap::new();
        for ns in namespaces {
            samples.insert(ns, self.list_samples(ns).await?);
        }

        let Some(newest) = samples.values().flat_map(|s| s.values()).map(|s| s.timestamp).max() else {
            debug!("no pod metrics available");
            return Ok(vec![]);
        };
        let cutoff = newest - TimeDelta::from_std(query.window)?;

        let mut labeled = vec![];
        for sel in &selectors {
            let Some(ns_samples) = sel.namespace.as_deref().and_then(|ns| samples.get(ns)) else {
                continue;
            };

            for sample in sel.pods.iter().filter_map(|pod| ns_samples.get(pod)) {
                if sample.timestamp < cutoff {
                    continue;
                }

                for name in &query.metric_names {
                    let y = if name == CPU_USAGE_METRIC { sample.cpu_millis } else { sample.memory_bytes };
                    let dp = DataPoint { x: newest.timestamp(), y };
                    labeled.push(LabeledMetric { id: sel.id.clone(), metric: Metric::new(name, vec![dp]) });
                }
            }
        }

        debug!("downloaded {} series for {} selectors", labeled.len(), selectors.len());
        Ok(labeled)
    }
}
