#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Catalog Publisher
//!
//! Registers already-written data locations into an external metadata catalog
//! after a data-movement job completes. This crate moves no data: it converts
//! the filesystem paths documented on completed task records into catalog
//! registration descriptors and commits them.
//!
//! ## Architecture
//!
//! The core is a concurrent registration pipeline. Published paths are
//! deduplicated across the batch, descriptor generation (the expensive,
//! possibly remote step) runs on a fixed-size worker pool, and results are
//! drained in completion order so fast paths are registered before slow ones.
//! Catalog commits stay strictly sequential on the draining task, so the
//! catalog client never needs to be safe for concurrent use.
//!
//! Generation policy and the catalog client are injected capabilities
//! ([`DescriptorGenerator`] and [`CatalogRegistrar`]) chosen at construction.
//!
//! ## Module Organization
//!
//! - [`records`] - Completed-task records and published-path extraction
//! - [`registration`] - The worker pool, draining pipeline, and lifecycle
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing initialization
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use catalog_publisher::{
//!     CatalogRegistrar, DescriptorGenerator, PublisherConfig, RegistrationPublisher, TaskRecord,
//! };
//!
//! # async fn example(
//! #     generator: Arc<dyn DescriptorGenerator>,
//! #     registrar: Arc<dyn CatalogRegistrar>,
//! #     batch: Vec<TaskRecord>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let config = PublisherConfig::load()?;
//! let publisher = RegistrationPublisher::new(&config, generator, registrar);
//!
//! publisher.register(&batch).await?;
//! publisher.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod records;
pub mod registration;

pub use config::{PublisherConfig, DEFAULT_PUBLISHED_PATHS_KEY, DEFAULT_WORKER_THREADS};
pub use error::{CloseError, ConfigurationError, PoolShutdownError, RegistrationError};
pub use records::{unique_published_paths, TaskRecord};
pub use registration::{
    CatalogRegistrar, Descriptor, DescriptorGenerator, GeneratorPool, RegistrationPublisher,
};
