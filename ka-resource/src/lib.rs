mod context;
pub mod daemonset;
pub mod deployment;
pub mod replicaset;

pub use context::ResourceContext;

#[cfg(test)]
mod tests;
