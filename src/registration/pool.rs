//! Fixed-size descriptor-generation worker pool.
//!
//! N workers are spawned at construction and all consume from a single job
//! queue; the pool never auto-scales. Each job carries its own reply sender,
//! so completed results flow to the submitting caller in the order they
//! finish, not the order they were submitted.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{Descriptor, DescriptorGenerator};
use crate::error::{PoolShutdownError, RegistrationError};

/// One unit of work binding a path to a generator invocation.
pub(crate) struct GenerationJob {
    pub path: String,
    pub reply: mpsc::UnboundedSender<GenerationOutcome>,
}

/// Result of one finished generation job, tagged with its path.
pub(crate) struct GenerationOutcome {
    pub path: String,
    pub result: anyhow::Result<Vec<Descriptor>>,
}

struct PoolState {
    /// Job queue sender; `None` once the pool is shut down.
    jobs: Option<mpsc::UnboundedSender<GenerationJob>>,
    workers: Vec<JoinHandle<()>>,
}

/// Owned worker pool with a single-owner lifecycle: created with the
/// enclosing publisher, shut down exactly once at close.
pub struct GeneratorPool {
    state: Mutex<PoolState>,
    worker_count: usize,
    shutdown_timeout: Duration,
}

impl GeneratorPool {
    pub fn new(
        generator: Arc<dyn DescriptorGenerator>,
        worker_count: usize,
        shutdown_timeout: Duration,
    ) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::unbounded_channel::<GenerationJob>();
        let jobs_rx = Arc::new(tokio::sync::Mutex::new(jobs_rx));

        let mut workers = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let jobs_rx = Arc::clone(&jobs_rx);
            let generator = Arc::clone(&generator);
            workers.push(tokio::spawn(async move {
                loop {
                    // Hold the queue lock only while waiting for the next job,
                    // never across generation itself.
                    let job = { jobs_rx.lock().await.recv().await };
                    let Some(job) = job else {
                        debug!(worker_id, "generation worker exiting, queue closed");
                        break;
                    };
                    let result = generator.generate(&job.path).await;
                    // The submitter may have bailed out fail-fast and dropped
                    // its receiver; a failed send just discards the result.
                    let _ = job.reply.send(GenerationOutcome {
                        path: job.path,
                        result,
                    });
                }
            }));
        }

        debug!(worker_count, "generator pool started");

        Self {
            state: Mutex::new(PoolState {
                jobs: Some(jobs_tx),
                workers,
            }),
            worker_count,
            shutdown_timeout,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Queue one path for descriptor generation.
    pub(crate) fn submit(&self, job: GenerationJob) -> Result<(), RegistrationError> {
        let state = self.state.lock();
        let Some(jobs) = state.jobs.as_ref() else {
            return Err(RegistrationError::PoolClosed);
        };
        jobs.send(job).map_err(|_| RegistrationError::PoolClosed)
    }

    /// Stop accepting submissions and wait for in-flight generation work.
    ///
    /// In-flight jobs run to completion within `shutdown_timeout`; workers
    /// still running at the deadline are left to finish detached. Calling
    /// shutdown again after it has completed is a no-op.
    pub async fn shutdown(&self) -> Result<(), PoolShutdownError> {
        let (jobs, workers) = {
            let mut state = self.state.lock();
            (state.jobs.take(), std::mem::take(&mut state.workers))
        };
        // Closing the queue lets each worker drain its current job and exit.
        drop(jobs);

        if workers.is_empty() {
            debug!("generator pool already shut down");
            return Ok(());
        }

        let total = workers.len();
        let deadline = Instant::now() + self.shutdown_timeout;
        for (index, handle) in workers.into_iter().enumerate() {
            let remaining_time = deadline.saturating_duration_since(Instant::now());
            match tokio::time::timeout(remaining_time, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(join_error)) => {
                    return Err(PoolShutdownError::WorkerFailed(join_error));
                }
                Err(_) => {
                    return Err(PoolShutdownError::Timeout {
                        remaining: total - index,
                        timeout: self.shutdown_timeout,
                    });
                }
            }
        }

        info!(worker_count = total, "generator pool shut down");
        Ok(())
    }
}
