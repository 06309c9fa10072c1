/*!
 * Per-unit translation with retry and backoff.
 *
 * Each unit moves through an explicit state machine:
 *
 * `Pending -> InFlight -> { Succeeded | Retrying -> InFlight | Failed }`
 *
 * Transient provider errors are retried with exponentially growing,
 * jittered delays; permanent errors and retry exhaustion end the unit in
 * the Failed state without affecting sibling units. Every attempt consumes
 * one rate-limiter grant; cache hits consume none.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use rand::Rng;

use crate::errors::UnitFailure;
use crate::pipeline::chunker::TranslationUnit;
use crate::pipeline::rate_limiter::RateLimiter;
use crate::providers::Provider;
use crate::translation::cache::TranslationCache;
use crate::translation::formatting::SpanMasker;

/// Backoff delays never exceed this ceiling.
pub const BACKOFF_CAP_MS: u64 = 30_000;

/// One translation outcome, produced exactly once per unit.
#[derive(Debug, Clone)]
pub struct TranslationResult {
    /// Index of the originating unit
    pub index: usize,
    /// Translated text with protected spans restored
    pub translated_text: String,
    /// Number of API attempts made (0 for a cache hit)
    pub attempts: u32,
}

/// Retry state of one unit while it is being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitState {
    /// Not yet dispatched
    Pending,
    /// An API attempt is running
    InFlight { attempt: u32 },
    /// A transient failure occurred; waiting out the backoff delay
    Retrying { attempt: u32 },
}

/// Deterministic part of the backoff schedule: base doubled per completed
/// attempt, capped at `BACKOFF_CAP_MS`.
pub fn backoff_base(base_ms: u64, attempt: u32) -> u64 {
    let shift = attempt.saturating_sub(1).min(15);
    base_ms.saturating_mul(1 << shift).min(BACKOFF_CAP_MS)
}

/// Full backoff delay for a retry after `attempt` failed: the deterministic
/// base plus up to 50% jitter, still capped.
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let base = backoff_base(base_ms, attempt);
    let jitter = rand::rng().random_range(0..=base / 2);
    Duration::from_millis((base + jitter).min(BACKOFF_CAP_MS))
}

/// Translates single units against a provider, with retry, rate limiting,
/// caching and inline-span protection.
pub struct TranslationClient<P: Provider> {
    provider: Arc<P>,
    limiter: Arc<RateLimiter>,
    cache: TranslationCache,
    retries: u32,
    backoff_base_ms: u64,
}

impl<P: Provider> TranslationClient<P> {
    /// Create a client.
    ///
    /// `retries` is the per-unit budget of additional attempts after the
    /// first one.
    pub fn new(
        provider: Arc<P>,
        limiter: Arc<RateLimiter>,
        cache: TranslationCache,
        retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        Self {
            provider,
            limiter,
            cache,
            retries,
            backoff_base_ms,
        }
    }

    /// Access the shared cache (for statistics reporting).
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Translate exactly one unit.
    ///
    /// Returns a failure record carrying the unit index and the last error
    /// when the unit reaches the Failed state; the caller decides what to
    /// do with sibling units.
    pub async fn translate_unit(
        &self,
        unit: &TranslationUnit,
        source_language: &str,
    ) -> Result<TranslationResult, UnitFailure> {
        if let Some(hit) =
            self.cache
                .get(&unit.source_text, source_language, &unit.target_language)
        {
            return Ok(TranslationResult {
                index: unit.index,
                translated_text: hit,
                attempts: 0,
            });
        }

        let (masked, spans) = SpanMasker::mask(&unit.source_text);
        let mut attempts = 0u32;
        let mut state = UnitState::Pending;

        loop {
            state = match state {
                UnitState::Pending => UnitState::InFlight { attempt: 1 },

                UnitState::InFlight { attempt } => {
                    self.limiter.acquire().await;
                    attempts = attempt;

                    match self
                        .provider
                        .translate(&masked, source_language, &unit.target_language)
                        .await
                    {
                        Ok(translated) => {
                            let restored = SpanMasker::restore(&translated, &spans);
                            self.cache.store(
                                &unit.source_text,
                                source_language,
                                &unit.target_language,
                                &restored,
                            );
                            debug!(
                                "unit {} translated in {} attempt(s)",
                                unit.index, attempts
                            );
                            return Ok(TranslationResult {
                                index: unit.index,
                                translated_text: restored,
                                attempts,
                            });
                        }
                        Err(error) if error.is_transient() && attempt <= self.retries => {
                            warn!(
                                "unit {} attempt {}/{} failed transiently: {}",
                                unit.index,
                                attempt,
                                self.retries + 1,
                                error
                            );
                            UnitState::Retrying { attempt }
                        }
                        Err(error) => {
                            return Err(UnitFailure {
                                index: unit.index,
                                error,
                                attempts,
                            });
                        }
                    }
                }

                UnitState::Retrying { attempt } => {
                    let delay = backoff_delay(self.backoff_base_ms, attempt);
                    debug!("unit {} backing off {:?}", unit.index, delay);
                    tokio::time::sleep(delay).await;
                    UnitState::InFlight {
                        attempt: attempt + 1,
                    }
                }
            };
        }
    }
}
