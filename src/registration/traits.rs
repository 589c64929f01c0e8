//! Injected capabilities the pipeline orchestrates.

use async_trait::async_trait;

use super::Descriptor;

/// Policy that maps one published path to the catalog entries it should
/// produce. Generation is the expensive step: implementations commonly
/// inspect schemas or call out to remote metadata services, so the pipeline
/// runs them concurrently on the worker pool.
#[async_trait]
pub trait DescriptorGenerator: Send + Sync {
    /// Produce the descriptors to register for `path`.
    ///
    /// Returning an empty collection is a valid, silent no-op for the path.
    async fn generate(&self, path: &str) -> anyhow::Result<Vec<Descriptor>>;
}

/// Client that commits descriptors to the external metadata catalog.
///
/// The pipeline never invokes `register` concurrently — calls are serialized
/// on the draining task — so implementations need not be reentrant.
/// Idempotency across repeated registrations of the same descriptor is the
/// implementation's concern, not the pipeline's.
#[async_trait]
pub trait CatalogRegistrar: Send + Sync {
    /// Commit one descriptor to the catalog.
    async fn register(&self, descriptor: Descriptor) -> anyhow::Result<()>;

    /// Release any handle the client holds against the catalog.
    async fn close(&self) -> anyhow::Result<()>;
}
