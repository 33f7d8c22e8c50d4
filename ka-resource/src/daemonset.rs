use std::sync::Arc;

use ka_api::{
    DaemonSet,
    DaemonSetList,
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
use ka_core::list::assemble;
use ka_core::metric::MetricsBackend;
use ka_core::prelude::*;
use tracing::*;

use crate::ResourceContext;

#[instrument(skip_all, fields(namespaces = ?ns.namespaces()))]
pub async fn get_daemon_set_list(
    ctx: &ResourceContext,
    ns: &NamespaceQuery,
    query: DataSelectQuery,
) -> anyhow::Result<DaemonSetList> {
    info!("getting daemon set list");
    let channels = ResourceChannels::dispatch(&ctx.fetcher, ns, false);
    get_daemon_set_list_from_channels(channels, ctx.config.apply(query), ctx.metrics.clone()).await
}

pub async fn get_daemon_set_list_from_channels(
    channels: ResourceChannels<appsv1::DaemonSet>,
    query: DataSelectQuery,
    metrics: Option<Arc<dyn MetricsBackend>>,
) -> anyhow::Result<DaemonSetList> {
    let list = assemble(channels, &query, metrics, to_daemon_set).await?;
    Ok(DaemonSetList {
        list_meta: list.list_meta,
        daemon_sets: list.items,
        cumulative_metrics: list.cumulative_metrics,
        item_metrics: list.item_metrics,
    })
}

pub async fn create_daemon_set_list(
    daemon_sets: Vec<appsv1::DaemonSet>,
    pods: Vec<corev1::Pod>,
    events: Vec<corev1::Event>,
    query: DataSelectQuery,
    metrics: Option<Arc<dyn MetricsBackend>>,
) -> anyhow::Result<DaemonSetList> {
    let channels = ResourceChannels {
        primary: ResourceChannel::ready(DAEMON_SET_KIND, Ok(daemon_sets)),
        pods: ResourceChannel::ready(POD_KIND, Ok(pods)),
        events: ResourceChannel::ready(EVENT_KIND, Ok(events)),
        controllers: None,
    };
    get_daemon_set_list_from_channels(channels, query, metrics).await
}

// Desired/current for a daemon set come from the scheduler's view of eligible nodes, see the
// PodOwner impl.
fn to_daemon_set(ds: appsv1::DaemonSet, pods: PodInfo) -> DaemonSet {
    let (container_images, init_container_images) = container_images(ds.pod_template());
    DaemonSet {
        object_meta: ObjectMeta::from(&ds.metadata),
        type_meta: TypeMeta::new(ResourceKind::DaemonSet),
        pods,
        container_images,
        init_container_images,
    }
}
