use std::sync::Arc;

use ka_api::{
    Deployment,
    DeploymentList,
    ObjectMeta,
    PodInfo,
    ResourceKind,
    TypeMeta,
};
use ka_core::dataselect::DataSelectQuery;
use ka_core::fetch::{
    NamespaceQuery,
    ResourceChannel,
    ResourceChannels,
};
use ka_core::k8s::container_images;
use ka_core::list::{
    AssembledList,
    assemble,
};
use ka_core::metric::MetricsBackend;
use ka_core::prelude::*;
use tracing::*;

use crate::ResourceContext;

// Deployments don't own their pods directly; the pods are owned by ReplicaSets, which are in turn
// owned by the Deployment, so this is the only kind that needs the controllers channel.
#[instrument(skip_all, fields(namespaces = ?ns.namespaces()))]
pub async fn get_deployment_list(
    ctx: &ResourceContext,
    ns: &NamespaceQuery,
    query: DataSelectQuery,
) -> anyhow::Result<DeploymentList> {
    info!("getting deployment list");
    let channels = ResourceChannels::dispatch(&ctx.fetcher, ns, true);
    get_deployment_list_from_channels(channels, ctx.config.apply(query), ctx.metrics.clone()).await
}

pub async fn get_deployment_list_from_channels(
    channels: ResourceChannels<appsv1::Deployment>,
    query: DataSelectQuery,
    metrics: Option<Arc<dyn MetricsBackend>>,
) -> anyhow::Result<DeploymentList> {
    let list: AssembledList<Deployment> = assemble(channels, &query, metrics, to_deployment).await?;
    Ok(DeploymentList {
        list_meta: list.list_meta,
        deployments: list.items,
        cumulative_metrics: list.cumulative_metrics,
        item_metrics: list.item_metrics,
    })
}

/// Build a deployment list from collections that have already been fetched.
pub async fn create_deployment_list(
    deployments: Vec<appsv1::Deployment>,
    pods: Vec<corev1::Pod>,
    events: Vec<corev1::Event>,
    replica_sets: Vec<appsv1::ReplicaSet>,
    query: DataSelectQuery,
    metrics: Option<Arc<dyn MetricsBackend>>,
) -> anyhow::Result<DeploymentList> {
    let channels = ResourceChannels {
        primary: ResourceChannel::ready(DEPLOYMENT_KIND, Ok(deployments)),
        pods: ResourceChannel::ready(POD_KIND, Ok(pods)),
        events: ResourceChannel::ready(EVENT_KIND, Ok(events)),
        controllers: Some(ResourceChannel::ready(REPLICA_SET_KIND, Ok(replica_sets))),
    };
    get_deployment_list_from_channels(channels, query, metrics).await
}

fn to_deployment(depl: appsv1::Deployment, pods: PodInfo) -> Deployment {
    let (container_images, init_container_images) = container_images(depl.pod_template());
    Deployment {
        object_meta: ObjectMeta::from(&depl.metadata),
        type_meta: TypeMeta::new(ResourceKind::Deployment),
        pods,
        container_images,
        init_container_images,
    }
}
