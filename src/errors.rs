/*!
 * Error types for the doctrans application.
 *
 * This module contains custom error types for different parts of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 * The split between `ProviderError` and `PipelineError` mirrors the
 * retry policy: provider errors are classified transient/permanent and
 * handled inside the translation client, pipeline errors abort the run.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors returned by translation API providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Failure to reach the API at all (DNS, connection refused, TLS, ...)
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within the per-attempt timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The API rejected the request because the rate limit was exceeded (HTTP 429)
    #[error("rate limited by API: {0}")]
    RateLimited(String),

    /// A 5xx-class response from the API
    #[error("API server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// A 4xx-class response other than 401/403/429
    #[error("API client error ({status}): {message}")]
    Client {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Authentication failure (HTTP 401/403, missing or invalid API key)
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The API responded but the body could not be parsed
    #[error("failed to parse API response: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Whether this error is worth retrying.
    ///
    /// Network errors, timeouts, rate-limit responses and server errors are
    /// transient; everything else is permanent and fails the unit on the
    /// first attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::RateLimited(_) | Self::Server { .. }
        )
    }
}

/// A failure record for a single translation unit, as reported by the
/// worker pool after retries were exhausted or a permanent error occurred.
#[derive(Debug)]
pub struct UnitFailure {
    /// Index of the unit that failed
    pub index: usize,
    /// The last error observed for that unit
    pub error: ProviderError,
    /// Number of attempts made before giving up
    pub attempts: u32,
}

impl std::fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unit {} failed after {} attempt(s): {}",
            self.index, self.attempts, self.error
        )
    }
}

/// Document-level errors that abort a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The source document contains nothing translatable
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// One or more units reached the Failed state; the run is aborted
    /// without writing output
    #[error("{} translation unit(s) failed", failures.len())]
    UnitsFailed {
        /// Per-unit failure records, sorted by unit index
        failures: Vec<UnitFailure>,
    },

    /// Reassembly was attempted with results missing for some unit indices
    #[error("incomplete translation, missing unit indices {missing:?}")]
    IncompleteTranslation {
        /// Unit indices without a result, sorted ascending
        missing: Vec<usize>,
    },

    /// The run was cancelled cooperatively; collected results were discarded
    #[error("translation run cancelled")]
    Cancelled,

    /// A file operation failed
    #[error("file error: {0}")]
    File(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
