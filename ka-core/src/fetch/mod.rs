mod channel;
mod fetcher;

pub use channel::{
    ResourceChannel,
    ResourceChannels,
};
pub use fetcher::{
    ListableResource,
    ResourceFetcher,
};
use thiserror::Error;

use crate::prelude::*;

pub type FetchResult<T> = Result<Vec<T>, FetchError>;

// FetchError is not declared through err_impl! because a single list result gets cloned out to
// every reader of a channel, and anyhow::Error isn't Clone.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FetchError {
    #[error("{0} is not served by this cluster")]
    NotFound(String),

    #[error("apiserver returned {code} listing {kind}: {message}")]
    Api { kind: String, code: u16, message: String },

    #[error("could not list {kind}: {message}")]
    Transport { kind: String, message: String },

    #[error("channel for {0} closed before a result was sent")]
    Closed(String),
}

impl FetchError {
    pub fn from_kube(kind: &str, err: kube::Error) -> FetchError {
        match err {
            kube::Error::Api(resp) if resp.code == 404 || resp.reason == NOT_FOUND_REASON => {
                FetchError::NotFound(kind.into())
            },
            kube::Error::Api(resp) => FetchError::Api {
                kind: kind.into(),
                code: resp.code,
                message: resp.message,
            },
            err => FetchError::Transport { kind: kind.into(), message: err.to_string() },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

// An empty query means "every namespace".  A query with exactly one namespace is sent to the
// apiserver as a namespaced list; anything else is a cluster-wide list that we filter here.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NamespaceQuery {
    namespaces: Vec<String>,
}

impl NamespaceQuery {
    pub fn all() -> NamespaceQuery {
        NamespaceQuery::default()
    }

    pub fn new(namespaces: Vec<String>) -> NamespaceQuery {
        let mut namespaces = namespaces;
        namespaces.retain(|ns| !ns.is_empty());
        namespaces.sort();
        namespaces.dedup();
        NamespaceQuery { namespaces }
    }

    pub fn single(ns: &str) -> NamespaceQuery {
        NamespaceQuery::new(vec![ns.into()])
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn request_namespace(&self) -> Option<&str> {
        match self.namespaces.as_slice() {
            [ns] => Some(ns.as_str()),
            _ => None,
        }
    }

    pub fn matches(&self, ns: Option<&str>) -> bool {
        if self.namespaces.is_empty() {
            return true;
        }
        ns.is_some_and(|ns| self.namespaces.iter().any(|n| n == ns))
    }
}

#[cfg(test)]
mod tests;
