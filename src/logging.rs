//! Structured logging initialization.
//!
//! Environment-aware tracing setup shared by binaries and tests. Safe to call
//! more than once; if a global subscriber is already installed (for example
//! by an embedding application) the existing one is kept.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with an `RUST_LOG`-style environment filter.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true),
        );

        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized, keeping existing one");
        }
    });
}
