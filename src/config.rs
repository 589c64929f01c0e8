//! Publisher configuration.
//!
//! Explicit, validated configuration with serde defaults: values come from an
//! optional TOML file merged with `CATALOG_PUBLISHER_*` environment overrides.
//! No silent fallbacks — a loaded configuration is validated before use.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Default number of generation workers when none is configured.
pub const DEFAULT_WORKER_THREADS: usize = 20;

/// Default property key under which upstream publishers record written paths.
pub const DEFAULT_PUBLISHED_PATHS_KEY: &str = "publisher.dirs";

const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 30;

/// Configuration surface consumed by [`RegistrationPublisher`](crate::RegistrationPublisher).
///
/// The injected generator and registrar carry whatever configuration they
/// need themselves; it is opaque to this crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublisherConfig {
    /// Fixed size of the descriptor-generation worker pool.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Well-known property key holding the published paths on a task record.
    #[serde(default = "default_published_paths_key")]
    pub published_paths_key: String,

    /// Bound on how long `close` waits for in-flight generation work.
    #[serde(default = "default_shutdown_timeout_seconds")]
    pub shutdown_timeout_seconds: u64,
}

fn default_worker_threads() -> usize {
    DEFAULT_WORKER_THREADS
}

fn default_published_paths_key() -> String {
    DEFAULT_PUBLISHED_PATHS_KEY.to_string()
}

fn default_shutdown_timeout_seconds() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_SECONDS
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            published_paths_key: default_published_paths_key(),
            shutdown_timeout_seconds: default_shutdown_timeout_seconds(),
        }
    }
}

impl PublisherConfig {
    /// Load configuration from environment overrides only.
    pub fn load() -> Result<Self, ConfigurationError> {
        Self::builder(None)
    }

    /// Load configuration from a TOML file merged with environment overrides.
    ///
    /// The file is optional; a missing file falls back to defaults. Overrides
    /// use the `CATALOG_PUBLISHER_` prefix, e.g. `CATALOG_PUBLISHER_WORKER_THREADS=8`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        Self::builder(Some(path.as_ref()))
    }

    fn builder(file: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("CATALOG_PUBLISHER").try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, rejecting values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.worker_threads == 0 {
            return Err(ConfigurationError::invalid_value(
                "worker_threads",
                "must be a positive integer",
            ));
        }
        if self.published_paths_key.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "published_paths_key",
                "must be a non-empty property key",
            ));
        }
        if self.shutdown_timeout_seconds == 0 {
            return Err(ConfigurationError::invalid_value(
                "shutdown_timeout_seconds",
                "must be at least one second",
            ));
        }
        Ok(())
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}
