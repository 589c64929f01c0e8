//! Structured error types for the registration pipeline.
//!
//! The pipeline is strictly fail-fast: the first error encountered while
//! draining generation results aborts the whole `register` call, wrapped so
//! the caller sees one failure reason plus the original cause. No retries
//! happen at this layer.

use std::time::Duration;

/// Error returned by [`RegistrationPublisher::register`](crate::RegistrationPublisher::register).
///
/// Any already-registered descriptors from paths drained before the failure
/// remain registered; partial effects are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// Descriptor generation failed for one path.
    #[error("descriptor generation failed for path '{path}'")]
    Generation {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The catalog client rejected one descriptor.
    #[error("catalog registration failed for path '{path}'")]
    Catalog {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The wait for the next completed generation task was interrupted:
    /// all workers went away before every expected result arrived.
    #[error("interrupted while waiting for descriptor generation results")]
    WaitInterrupted,

    /// A submission was attempted after the worker pool shut down.
    #[error("generator pool is closed")]
    PoolClosed,
}

/// Error returned when shutting down the generator pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolShutdownError {
    /// In-flight generation work did not finish within the shutdown timeout.
    #[error("{remaining} generation worker(s) still running after {timeout:?}")]
    Timeout { remaining: usize, timeout: Duration },

    /// A worker task panicked or was aborted out from under the pool.
    #[error("generation worker terminated abnormally")]
    WorkerFailed(#[source] tokio::task::JoinError),
}

/// Error returned by [`RegistrationPublisher::close`](crate::RegistrationPublisher::close).
///
/// Pool shutdown failure takes precedence over a catalog handle close
/// failure; the catalog release is always attempted, and its failure is
/// logged even when the pool error is the one surfaced.
#[derive(Debug, thiserror::Error)]
pub enum CloseError {
    #[error("generator pool shutdown failed")]
    Pool(#[source] PoolShutdownError),

    #[error("catalog handle close failed")]
    Catalog(#[source] anyhow::Error),
}

/// Error raised while loading or validating [`PublisherConfig`](crate::PublisherConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to load configuration")]
    Load(#[from] config::ConfigError),
}

impl ConfigurationError {
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
