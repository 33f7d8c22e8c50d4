use tokio::sync::oneshot;

use super::*;

/// A handle to exactly one list result.  `recv` consumes the handle, so a channel can't be read
/// twice; if the producing task goes away without sending, the reader gets `FetchError::Closed`.
pub struct ResourceChannel<T> {
    kind: String,
    rx: oneshot::Receiver<FetchResult<T>>,
}

impl<T> ResourceChannel<T> {
    pub fn new(kind: &str) -> (oneshot::Sender<FetchResult<T>>, ResourceChannel<T>) {
        let (tx, rx) = oneshot::channel();
        (tx, ResourceChannel { kind: kind.into(), rx })
    }

    /// Build a channel whose result is already available.
    pub fn ready(kind: &str, result: FetchResult<T>) -> ResourceChannel<T> {
        let (tx, chan) = ResourceChannel::new(kind);
        // The receiver is alive (we're holding it), so this can't fail
        let _ = tx.send(result);
        chan
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub async fn recv(self) -> FetchResult<T> {
        let ResourceChannel { kind, rx } = self;
        rx.await.unwrap_or_else(|_| Err(FetchError::Closed(kind)))
    }
}

// The set of collections a workload list needs.  Controllers are only fetched for kinds whose pods
// are owned through an intermediate object (Deployment -> ReplicaSet -> Pod).
pub struct ResourceChannels<K> {
    pub primary: ResourceChannel<K>,
    pub pods: ResourceChannel<corev1::Pod>,
    pub events: ResourceChannel<corev1::Event>,
    pub controllers: Option<ResourceChannel<appsv1::ReplicaSet>>,
}

impl<K: ListableResource> ResourceChannels<K> {
    pub fn dispatch(fetcher: &ResourceFetcher, ns: &NamespaceQuery, with_controllers: bool) -> ResourceChannels<K> {
        ResourceChannels {
            primary: fetcher.dispatch_one(ns),
            pods: fetcher.dispatch_one(ns),
            events: fetcher.dispatch_one(ns),
            controllers: with_controllers.then(|| fetcher.dispatch_one(ns)),
        }
    }
}
