/*!
 * Bounded concurrent execution of unit translations.
 *
 * Units are fed through a buffered stream with at most `max_workers` calls
 * in flight. Completion order is arbitrary; the unit index is the only
 * ordering key downstream. A failed unit never aborts its siblings, and the
 * pool always waits for every dispatched unit to reach a terminal state
 * before returning.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use futures::stream::{self, StreamExt};
use log::{debug, info};
use tokio::sync::Semaphore;

use crate::errors::UnitFailure;
use crate::pipeline::chunker::TranslationUnit;
use crate::providers::Provider;
use crate::translation::client::{TranslationClient, TranslationResult};

/// Cooperative cancellation flag shared between the orchestrator and the
/// pool. Once set, no new units are dispatched; in-flight attempts finish.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Aggregate outcome of a pool run.
pub struct PoolOutcome {
    /// Successful results, sorted by unit index
    pub results: Vec<TranslationResult>,
    /// Failure records, sorted by unit index
    pub failures: Vec<UnitFailure>,
    /// Whether the run was cancelled before all units were dispatched
    pub cancelled: bool,
}

/// Worker pool running translation client calls concurrently.
pub struct WorkerPool<P: Provider> {
    /// The per-unit translation client
    client: Arc<TranslationClient<P>>,
    /// Maximum number of concurrent in-flight calls
    max_workers: usize,
}

impl<P: Provider + 'static> WorkerPool<P> {
    /// Create a pool over a shared client.
    pub fn new(client: Arc<TranslationClient<P>>, max_workers: usize) -> Self {
        Self {
            client,
            max_workers,
        }
    }

    /// Translate all units, at most `max_workers` concurrently.
    ///
    /// The progress callback receives (completed, total) whenever a unit
    /// reaches a terminal state.
    pub async fn run(
        &self,
        units: &[TranslationUnit],
        source_language: &str,
        cancel: &CancelFlag,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> PoolOutcome {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let total_units = units.len();
        let completed = Arc::new(AtomicUsize::new(0));
        let start_time = Instant::now();

        let outcomes = stream::iter(units.iter())
            .map(|unit| {
                let client = Arc::clone(&self.client);
                let semaphore = Arc::clone(&semaphore);
                let completed = Arc::clone(&completed);
                let progress_callback = progress_callback.clone();
                let cancel = cancel.clone();
                let source_language = source_language.to_string();
                let unit = unit.clone();

                async move {
                    // Acquire a permit from the semaphore
                    let _permit = semaphore.acquire().await.unwrap();

                    // Dispatch nothing new after cancellation
                    if cancel.is_cancelled() {
                        return None;
                    }

                    let result = client.translate_unit(&unit, &source_language).await;

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(done, total_units);

                    match &result {
                        Ok(r) => debug!(
                            "unit {} done ({}/{}), {} attempt(s)",
                            unit.index, done, total_units, r.attempts
                        ),
                        Err(f) => debug!("unit {} failed ({}/{}): {}", unit.index, done, total_units, f),
                    }

                    Some(result)
                }
            })
            .buffer_unordered(self.max_workers)
            .collect::<Vec<_>>()
            .await;

        let mut results = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes.into_iter().flatten() {
            match outcome {
                Ok(result) => results.push(result),
                Err(failure) => failures.push(failure),
            }
        }

        results.sort_by_key(|r| r.index);
        failures.sort_by_key(|f| f.index);

        info!(
            "pool finished: {} ok, {} failed, {} unit(s) total in {:?}",
            results.len(),
            failures.len(),
            total_units,
            start_time.elapsed()
        );

        PoolOutcome {
            results,
            failures,
            cancelled: cancel.is_cancelled(),
        }
    }
}
