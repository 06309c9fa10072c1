use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{Provider, classify_status, classify_transport};

/// Default public endpoint of the Cloud Translation v2 API.
const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com";

/// Google Cloud Translation v2 client.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
    /// Per-attempt request timeout
    timeout: Duration,
}

/// Translation request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Source language code
    source: &'a str,
    /// Target language code
    target: &'a str,
    /// Plain text, not HTML
    format: &'static str,
}

/// Translation response envelope
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl GoogleTranslate {
    /// Create a new client.
    ///
    /// An empty endpoint selects the public API.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/language/translate/v2", base)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Authentication(
                "no API key configured for Google Translate".to_string(),
            ));
        }

        let request = TranslateRequest {
            q: text,
            source: source_language,
            target: target_language,
            format: "text",
        };

        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response body".to_string());
            return Err(classify_status(status.as_u16(), message));
        }

        let parsed = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                ProviderError::Parse("response contained no translations".to_string())
            })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("ping", "en", "fr").await.map(|_| ())
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
