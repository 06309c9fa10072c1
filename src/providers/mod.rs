/*!
 * Provider implementations for translation services.
 *
 * This module contains client implementations for the supported
 * translation APIs:
 * - Google: Google Cloud Translation v2 REST API
 * - LibreTranslate: self-hosted LibreTranslate server
 * - Mock: deterministic in-process provider for tests and benchmarks
 */

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;

/// Common trait for all translation providers.
///
/// One call translates one unit's text; the retry policy lives above this
/// seam, so implementations perform exactly one network request per call
/// and classify any failure.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate `text` from `source_language` to `target_language`.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the provider.
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider name for logging.
    fn name(&self) -> &'static str;
}

/// Map an HTTP error status to the provider error taxonomy.
pub(crate) fn classify_status(status: u16, message: String) -> ProviderError {
    match status {
        401 | 403 => ProviderError::Authentication(message),
        429 => ProviderError::RateLimited(message),
        400..=499 => ProviderError::Client { status, message },
        _ => ProviderError::Server { status, message },
    }
}

/// Map a reqwest transport error to the provider error taxonomy.
pub(crate) fn classify_transport(error: reqwest::Error, timeout: Duration) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(timeout)
    } else {
        ProviderError::Network(error.to_string())
    }
}

pub mod google;
pub mod libretranslate;
pub mod mock;

/// Configured provider implementation variants.
#[derive(Debug)]
pub enum AnyProvider {
    /// Google Cloud Translation API
    Google(google::GoogleTranslate),
    /// Self-hosted LibreTranslate server
    LibreTranslate(libretranslate::LibreTranslate),
}

impl AnyProvider {
    /// Build the provider named by the configuration.
    pub fn from_config(config: &ProviderConfig, timeout: Duration) -> Self {
        match config.kind {
            ProviderKind::Google => Self::Google(google::GoogleTranslate::new(
                config.api_key.clone(),
                config.endpoint.clone(),
                timeout,
            )),
            ProviderKind::LibreTranslate => Self::LibreTranslate(libretranslate::LibreTranslate::new(
                config.endpoint.clone(),
                Some(config.api_key.clone()),
                timeout,
            )),
        }
    }
}

#[async_trait]
impl Provider for AnyProvider {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        match self {
            Self::Google(client) => client.translate(text, source_language, target_language).await,
            Self::LibreTranslate(client) => {
                client.translate(text, source_language, target_language).await
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self {
            Self::Google(client) => client.test_connection().await,
            Self::LibreTranslate(client) => client.test_connection().await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Google(client) => client.name(),
            Self::LibreTranslate(client) => client.name(),
        }
    }
}
