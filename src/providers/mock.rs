/*!
 * Mock provider for tests and benchmarks.
 *
 * Simulates different API behaviors:
 * - `MockProvider::working()` - always succeeds with a deterministic translation
 * - `MockProvider::fail_first(n)` - first n calls fail transiently, then succeeds
 * - `MockProvider::failing_transient()` / `failing_permanent()` - always fails
 * - `MockProvider::fail_matching(s)` - permanently fails units containing `s`
 * - `MockProvider::slow(ms)` - succeeds after a delay
 *
 * It also instruments concurrency: an in-flight gauge with a high-water
 * mark, used to verify the worker pool bound.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeeds with a deterministic translation
    Working,
    /// The first `n` calls fail transiently (server error), then succeed
    FailFirst { n: usize },
    /// Every call fails; transient or permanent per the flag
    Failing { transient: bool },
    /// Calls whose text contains the needle fail permanently
    FailMatching { needle: String },
    /// Succeeds after a fixed delay
    Slow { delay_ms: u64 },
}

/// Mock provider with deterministic translations and failure injection
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Fixed translations, looked up before the default transform applies
    translations: HashMap<String, String>,
    /// Total number of translate calls
    calls: AtomicUsize,
    /// Number of calls currently executing
    in_flight: Arc<AtomicUsize>,
    /// Highest observed in-flight count
    max_in_flight: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            translations: HashMap::new(),
            calls: AtomicUsize::new(0),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock whose first `n` calls fail transiently
    pub fn fail_first(n: usize) -> Self {
        Self::new(MockBehavior::FailFirst { n })
    }

    /// Create a mock that always fails with a transient error
    pub fn failing_transient() -> Self {
        Self::new(MockBehavior::Failing { transient: true })
    }

    /// Create a mock that always fails with a permanent error
    pub fn failing_permanent() -> Self {
        Self::new(MockBehavior::Failing { transient: false })
    }

    /// Create a mock that permanently fails calls containing `needle`
    pub fn fail_matching(needle: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailMatching {
            needle: needle.into(),
        })
    }

    /// Create a mock that succeeds after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Add a fixed translation mapping
    pub fn with_translation(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.translations.insert(source.into(), target.into());
        self
    }

    /// Total number of translate calls observed
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of concurrently executing calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn render(&self, text: &str, target_language: &str) -> String {
        match self.translations.get(text) {
            Some(fixed) => fixed.clone(),
            None => format!("[{}] {}", target_language, text),
        }
    }
}

/// Decrements the in-flight gauge when a call completes, on every exit path
struct InFlightGuard {
    gauge: Arc<AtomicUsize>,
}

impl InFlightGuard {
    fn enter(gauge: &Arc<AtomicUsize>, high_water: &Arc<AtomicUsize>) -> Self {
        let now = gauge.fetch_add(1, Ordering::SeqCst) + 1;
        high_water.fetch_max(now, Ordering::SeqCst);
        Self {
            gauge: Arc::clone(gauge),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let _guard = InFlightGuard::enter(&self.in_flight, &self.max_in_flight);
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        // A tiny yield keeps overlap observable for the gauge even when the
        // behavior has no delay
        tokio::time::sleep(Duration::from_millis(1)).await;

        match &self.behavior {
            MockBehavior::Working => Ok(self.render(text, target_language)),
            MockBehavior::FailFirst { n } => {
                if call < *n {
                    Err(ProviderError::Server {
                        status: 503,
                        message: format!("injected transient failure {}", call),
                    })
                } else {
                    Ok(self.render(text, target_language))
                }
            }
            MockBehavior::Failing { transient } => {
                if *transient {
                    Err(ProviderError::Server {
                        status: 500,
                        message: "injected server error".to_string(),
                    })
                } else {
                    Err(ProviderError::Client {
                        status: 400,
                        message: "injected client error".to_string(),
                    })
                }
            }
            MockBehavior::FailMatching { needle } => {
                if text.contains(needle.as_str()) {
                    Err(ProviderError::Client {
                        status: 400,
                        message: format!("injected failure for text containing {:?}", needle),
                    })
                } else {
                    Ok(self.render(text, target_language))
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(self.render(text, target_language))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
