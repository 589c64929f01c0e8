//! # Catalog Registration Pipeline
//!
//! The concurrent core of the crate: deduplicated published paths are fanned
//! out to a fixed-size pool of descriptor-generation workers, results are
//! drained in completion order, and each drained path's descriptors are
//! committed to the catalog strictly sequentially on the draining task.
//!
//! Generation policy and the catalog client are injected capabilities
//! ([`DescriptorGenerator`] and [`CatalogRegistrar`]), selected by the
//! embedding application at construction time.

pub mod pool;
pub mod publisher;
pub mod traits;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use pool::GeneratorPool;
pub use publisher::RegistrationPublisher;
pub use traits::{CatalogRegistrar, DescriptorGenerator};

/// One catalog entry to be registered for a published data path.
///
/// Created by a [`DescriptorGenerator`], consumed immediately by a
/// [`CatalogRegistrar`], never retained by the pipeline. A single path may
/// map to zero, one, or many descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Filesystem path the catalog entry points at.
    pub path: String,
    /// Name of the catalog entity (table, dataset, ...) being registered.
    pub entity: String,
    /// Free-form metadata the registrar forwards to the catalog.
    pub metadata: Value,
    /// When the descriptor was generated.
    pub created_at: DateTime<Utc>,
}

impl Descriptor {
    pub fn new(path: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entity: entity.into(),
            metadata: Value::Null,
            created_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}
