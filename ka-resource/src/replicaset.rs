use std::sync::Arc;

use ka_api::{
    ObjectMeta,
    PodInfo,
    ReplicaSet,
    ReplicaSetList,
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
use ka_core::list::assemble;
use ka_core::metric::MetricsBackend;
use ka_core::prelude::*;
use tracing::*;

use crate::ResourceContext;

#[instrument(skip_all, fields(namespaces = ?ns.namespaces()))]
pub async fn get_replica_set_list(
    ctx: &ResourceContext,
    ns: &NamespaceQuery,
    query: DataSelectQuery,
) -> anyhow::Result<ReplicaSetList> {
    info!("getting replica set list");
    let channels = ResourceChannels::dispatch(&ctx.fetcher, ns, false);
    get_replica_set_list_from_channels(channels, ctx.config.apply(query), ctx.metrics.clone()).await
}

pub async fn get_replica_set_list_from_channels(
    channels: ResourceChannels<appsv1::ReplicaSet>,
    query: DataSelectQuery,
    metrics: Option<Arc<dyn MetricsBackend>>,
) -> anyhow::Result<ReplicaSetList> {
    let list = assemble(channels, &query, metrics, to_replica_set).await?;
    Ok(ReplicaSetList {
        list_meta: list.list_meta,
        replica_sets: list.items,
        cumulative_metrics: list.cumulative_metrics,
        item_metrics: list.item_metrics,
    })
}

pub async fn create_replica_set_list(
    replica_sets: Vec<appsv1::ReplicaSet>,
    pods: Vec<corev1::Pod>,
    events: Vec<corev1::Event>,
    query: DataSelectQuery,
    metrics: Option<Arc<dyn MetricsBackend>>,
) -> anyhow::Result<ReplicaSetList> {
    let channels = ResourceChannels {
        primary: ResourceChannel::ready(REPLICA_SET_KIND, Ok(replica_sets)),
        pods: ResourceChannel::ready(POD_KIND, Ok(pods)),
        events: ResourceChannel::ready(EVENT_KIND, Ok(events)),
        controllers: None,
    };
    get_replica_set_list_from_channels(channels, query, metrics).await
}

fn to_replica_set(rs: appsv1::ReplicaSet, pods: PodInfo) -> ReplicaSet {
    let (container_images, init_container_images) = container_images(rs.pod_template());
    ReplicaSet {
        object_meta: ObjectMeta::from(&rs.metadata),
        type_meta: TypeMeta::new(ResourceKind::ReplicaSet),
        pods,
        container_images,
        init_container_images,
    }
}
