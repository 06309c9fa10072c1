use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{Provider, classify_status, classify_transport};

/// LibreTranslate client for a self-hosted translation server.
#[derive(Debug)]
pub struct LibreTranslate {
    /// Base URL of the server, e.g. "http://localhost:5000"
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Optional API key (many self-hosted instances run without one)
    api_key: Option<String>,
    /// Per-attempt request timeout
    timeout: Duration,
}

/// Translation request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Translation response body
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslate {
    /// Create a new client for the given server URL.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.is_empty() {
            "http://localhost:5000".to_string()
        } else {
            base_url.trim_end_matches('/').to_string()
        };

        Self {
            base_url,
            client: Client::builder()
                .timeout(timeout)
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout,
        }
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate", self.base_url);

        let request = TranslateRequest {
            q: text,
            source: source_language,
            target: target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&url)
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

        response
            .json::<TranslateResponse>()
            .await
            .map(|r| r.translated_text)
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/languages", self.base_url);
        let response = self
            .client
            .get(&url)
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
        Ok(())
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}
