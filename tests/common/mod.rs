//! Shared mock capabilities for pipeline integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use catalog_publisher::{CatalogRegistrar, Descriptor, DescriptorGenerator, TaskRecord};

/// Build a task record carrying the given paths under the default key.
pub fn record(paths: &[&str]) -> TaskRecord {
    TaskRecord::new().with_property(
        catalog_publisher::DEFAULT_PUBLISHED_PATHS_KEY,
        json!(paths),
    )
}

/// Per-path script: what to return, how long to take, whether to fail.
#[derive(Clone, Default)]
struct GenerationScript {
    descriptors: Vec<Descriptor>,
    delay: Duration,
    fail: bool,
}

/// Generator returning scripted results per path, recording every invocation.
/// Unknown paths yield an empty descriptor set immediately.
#[derive(Default)]
pub struct ScriptedGenerator {
    scripts: HashMap<String, GenerationScript>,
    pub generated_paths: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `descriptor_count` descriptors for `path`, produced after `delay`.
    pub fn path(mut self, path: &str, descriptor_count: usize, delay: Duration) -> Self {
        let descriptors = (0..descriptor_count)
            .map(|i| Descriptor::new(path, format!("entity_{i}")))
            .collect();
        self.scripts.insert(
            path.to_string(),
            GenerationScript {
                descriptors,
                delay,
                fail: false,
            },
        );
        self
    }

    /// Script a generation failure for `path` after `delay`.
    pub fn failing_path(mut self, path: &str, delay: Duration) -> Self {
        self.scripts.insert(
            path.to_string(),
            GenerationScript {
                descriptors: Vec::new(),
                delay,
                fail: true,
            },
        );
        self
    }
}

#[async_trait]
impl DescriptorGenerator for ScriptedGenerator {
    async fn generate(&self, path: &str) -> anyhow::Result<Vec<Descriptor>> {
        self.generated_paths.lock().push(path.to_string());
        let script = self.scripts.get(path).cloned().unwrap_or_default();
        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        if script.fail {
            anyhow::bail!("scripted generation failure for {path}");
        }
        Ok(script.descriptors)
    }
}

/// Registrar recording every committed descriptor, with optional scripted
/// failures and a watermark of concurrently in-flight register calls.
#[derive(Default)]
pub struct RecordingRegistrar {
    pub registered: Mutex<Vec<Descriptor>>,
    pub close_calls: AtomicUsize,
    register_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    fail_on_call: Option<usize>,
    fail_close: bool,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the nth register call (1-based); earlier calls succeed.
    pub fn failing_on_call(mut self, nth: usize) -> Self {
        self.fail_on_call = Some(nth);
        self
    }

    pub fn failing_on_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn registered_paths(&self) -> Vec<String> {
        self.registered.lock().iter().map(|d| d.path.clone()).collect()
    }
}

#[async_trait]
impl CatalogRegistrar for RecordingRegistrar {
    async fn register(&self, descriptor: Descriptor) -> anyhow::Result<()> {
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        // Widen the window in which a concurrent call would be observable.
        tokio::time::sleep(Duration::from_millis(2)).await;

        let call = self.register_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let result = if self.fail_on_call == Some(call) {
            Err(anyhow::anyhow!(
                "scripted registration failure on call {call}"
            ))
        } else {
            self.registered.lock().push(descriptor);
            Ok(())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            anyhow::bail!("scripted catalog close failure");
        }
        Ok(())
    }
}
