/*!
 * Pipeline orchestration.
 *
 * Wires Chunker -> WorkerPool -> Reassembler and owns the run policy: the
 * output is produced only when every unit succeeded, failures are reported
 * with their unit indices, and a cancelled run discards everything that was
 * collected.
 */

use std::path::Path;
use std::sync::Arc;

use log::{error, info};

use crate::app_config::PipelineConfig;
use crate::document::Document;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::pipeline::chunker::Chunker;
use crate::pipeline::rate_limiter::RateLimiter;
use crate::pipeline::reassembler::Reassembler;
use crate::pipeline::worker_pool::{CancelFlag, WorkerPool};
use crate::providers::Provider;
use crate::translation::cache::TranslationCache;
use crate::translation::client::TranslationClient;

/// Drives a whole translation run over one document.
pub struct Orchestrator<P: Provider> {
    client: Arc<TranslationClient<P>>,
    pool: WorkerPool<P>,
    chunker: Chunker,
    cancel: CancelFlag,
}

impl<P: Provider + 'static> Orchestrator<P> {
    /// Build an orchestrator from a provider and validated pipeline config.
    ///
    /// All configuration is taken here; nothing global is consulted later.
    pub fn new(provider: Arc<P>, config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;

        let limiter = Arc::new(RateLimiter::new(config.rate_limit)?);
        let client = Arc::new(TranslationClient::new(
            provider,
            limiter,
            TranslationCache::default(),
            config.retries,
            config.retry_backoff_ms,
        ));
        let pool = WorkerPool::new(Arc::clone(&client), config.max_workers);
        let chunker = Chunker::new(config.chunk_size)?;

        Ok(Self {
            client,
            pool,
            chunker,
            cancel: CancelFlag::new(),
        })
    }

    /// Handle for requesting cooperative cancellation of the current run.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Cache statistics of the underlying client: (hits, misses, hit rate).
    pub fn cache_stats(&self) -> (usize, usize, f64) {
        self.client.cache().stats()
    }

    /// Number of entries held by the client's cache.
    pub fn cache_len(&self) -> usize {
        self.client.cache().len()
    }

    /// Translate a source string end to end.
    pub async fn translate_text(
        &self,
        source: &str,
        source_language: &str,
        target_language: &str,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<String, PipelineError> {
        let document = Document::parse(source);
        let plan = self.chunker.chunk(&document, target_language)?;
        info!(
            "document split into {} unit(s) across {} segment(s)",
            plan.units.len(),
            document.segments.len()
        );

        let outcome = self
            .pool
            .run(&plan.units, source_language, &self.cancel, progress_callback)
            .await;

        if outcome.cancelled {
            // Collected results are dropped here, per the cancellation
            // contract: no partial document ever leaves the pipeline
            info!("run cancelled, discarding {} collected result(s)", outcome.results.len());
            return Err(PipelineError::Cancelled);
        }

        if !outcome.failures.is_empty() {
            for failure in &outcome.failures {
                error!("{}", failure);
            }
            return Err(PipelineError::UnitsFailed {
                failures: outcome.failures,
            });
        }

        Reassembler::reassemble(&plan, &outcome.results)
    }

    /// Translate a file, writing the output atomically on full success.
    ///
    /// On any failure the output path is left untouched.
    pub async fn translate_file(
        &self,
        input: &Path,
        output: &Path,
        source_language: &str,
        target_language: &str,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<(), PipelineError> {
        let source = FileManager::read_to_string(input)
            .map_err(|e| PipelineError::File(e.to_string()))?;

        let translated = self
            .translate_text(&source, source_language, target_language, progress_callback)
            .await?;

        FileManager::write_atomic(output, &translated)
            .map_err(|e| PipelineError::File(e.to_string()))?;

        info!("wrote {:?}", output);
        Ok(())
    }
}
