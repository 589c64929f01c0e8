//! Registration publisher: ties path deduplication, the generation pool,
//! and the catalog registrar into one `register`/`close` lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::pool::{GenerationJob, GeneratorPool};
use super::{CatalogRegistrar, DescriptorGenerator};
use crate::config::PublisherConfig;
use crate::error::{CloseError, RegistrationError};
use crate::records::{unique_published_paths, TaskRecord};

/// Registers already-published data paths with the external catalog.
///
/// This publisher moves no data. It reads the paths an upstream publisher
/// documented on the completed task records, generates catalog descriptors
/// for each unique path on the worker pool, and commits them through the
/// injected registrar.
pub struct RegistrationPublisher {
    registrar: Arc<dyn CatalogRegistrar>,
    pool: GeneratorPool,
    published_paths_key: String,
    closed: AtomicBool,
}

impl RegistrationPublisher {
    pub fn new(
        config: &PublisherConfig,
        generator: Arc<dyn DescriptorGenerator>,
        registrar: Arc<dyn CatalogRegistrar>,
    ) -> Self {
        let pool = GeneratorPool::new(generator, config.worker_threads, config.shutdown_timeout());
        Self {
            registrar,
            pool,
            published_paths_key: config.published_paths_key.clone(),
            closed: AtomicBool::new(false),
        }
    }

    /// Register every path published by the given batch of completed tasks.
    ///
    /// One generation task is submitted per unique path; results are drained
    /// in completion order, and each drained path's descriptors are committed
    /// sequentially on this task before the next drained path begins. The
    /// call is fail-fast: the first generation or registration error aborts
    /// it, leaving generation tasks still in the pool to run out in the
    /// background with their results discarded.
    pub async fn register(&self, batch: &[TaskRecord]) -> Result<(), RegistrationError> {
        let paths = unique_published_paths(batch, &self.published_paths_key);
        info!(
            path_count = paths.len(),
            "number of paths to be registered in catalog"
        );
        if paths.is_empty() {
            return Ok(());
        }

        let expected = paths.len();
        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
        for path in paths {
            self.pool.submit(GenerationJob {
                path,
                reply: reply_tx.clone(),
            })?;
        }
        // Workers hold the remaining clones; the channel closes once every
        // submitted job has replied or been discarded.
        drop(reply_tx);

        let mut registered = 0usize;
        for _ in 0..expected {
            let outcome = reply_rx
                .recv()
                .await
                .ok_or(RegistrationError::WaitInterrupted)?;
            let descriptors = match outcome.result {
                Ok(descriptors) => descriptors,
                Err(source) => {
                    error!(path = %outcome.path, error = %source, "failed to generate descriptors");
                    return Err(RegistrationError::Generation {
                        path: outcome.path,
                        source,
                    });
                }
            };

            // All of one path's descriptors are committed back to back; no
            // descriptor from another path interleaves.
            let descriptor_count = descriptors.len();
            for descriptor in descriptors {
                self.registrar
                    .register(descriptor)
                    .await
                    .map_err(|source| RegistrationError::Catalog {
                        path: outcome.path.clone(),
                        source,
                    })?;
                registered += 1;
            }
            debug!(path = %outcome.path, descriptor_count, "registered descriptors for path");
        }

        info!(
            descriptor_count = registered,
            "finished registering all descriptors"
        );
        Ok(())
    }

    /// Shut down the worker pool, then release the catalog handle.
    ///
    /// The catalog release is attempted even when pool shutdown fails; in
    /// that case the pool error is surfaced and the catalog failure, if any,
    /// is logged. Closing an already-closed publisher is a no-op.
    pub async fn close(&self) -> Result<(), CloseError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("publisher already closed");
            return Ok(());
        }

        let pool_result = self.pool.shutdown().await;
        if let Err(err) = &pool_result {
            error!(error = %err, "generator pool shutdown failed");
        }

        let catalog_result = self.registrar.close().await;
        if let Err(err) = &catalog_result {
            error!(error = %err, "failed to close catalog handle");
        }

        match (pool_result, catalog_result) {
            (Err(pool_err), _) => Err(CloseError::Pool(pool_err)),
            (Ok(()), Err(catalog_err)) => Err(CloseError::Catalog(catalog_err)),
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }
}
