use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::PipelineError;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// File extensions considered translatable when the input is a directory
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,

    /// Translation provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pipeline tuning parameters
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            file_extensions: default_file_extensions(),
            provider: ProviderConfig::default(),
            pipeline: PipelineConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Google Cloud Translation v2 REST API
    #[default]
    Google,
    // @provider: Self-hosted LibreTranslate server
    LibreTranslate,
}

impl ProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::LibreTranslate => "LibreTranslate",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::LibreTranslate => write!(f, "libretranslate"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "libretranslate" => Ok(Self::LibreTranslate),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub kind: ProviderKind,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL (empty selects the provider's public endpoint)
    #[serde(default = "String::new")]
    pub endpoint: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            api_key: String::new(),
            endpoint: String::new(),
        }
    }
}

/// Pipeline tuning parameters.
///
/// All values are validated once by `Config::validate`; the pipeline itself
/// treats them as read-only for the duration of a run.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Maximum characters per translation unit
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum number of concurrent in-flight requests
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Maximum sustained request rate in requests per second
    #[serde(default = "default_rate_limit")]
    pub rate_limit: f64,

    /// Per-unit retry budget for transient failures
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Base backoff time in milliseconds, doubled per retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Per-attempt request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_workers: default_max_workers(),
            rate_limit: default_rate_limit(),
            retries: default_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    /// Validate the pipeline parameters, failing fast with `InvalidConfig`.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.chunk_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.max_workers == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_workers must be positive".to_string(),
            ));
        }
        if !self.rate_limit.is_finite() || self.rate_limit <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "rate_limit must be a positive number of requests per second, got {}",
                self.rate_limit
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(PipelineError::InvalidConfig(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: log crate level filter for this config level
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, or return defaults if the file
    /// does not exist yet.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path, e))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| anyhow!("Failed to write config file {:?}: {}", path.as_ref(), e))?;
        Ok(())
    }

    /// Validate the whole configuration: language codes and pipeline values.
    pub fn validate(&self) -> Result<(), PipelineError> {
        language_utils::validate_language_code(&self.source_language).map_err(|e| {
            PipelineError::InvalidConfig(format!("bad source language: {}", e))
        })?;
        language_utils::validate_language_code(&self.target_language).map_err(|e| {
            PipelineError::InvalidConfig(format!("bad target language: {}", e))
        })?;
        if language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(PipelineError::InvalidConfig(format!(
                "source and target language are the same ({} -> {})",
                self.source_language, self.target_language
            )));
        }
        if self.file_extensions.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "file_extensions must not be empty".to_string(),
            ));
        }
        self.pipeline.validate()
    }
}

// Defaults mirror the chunked translation tooling this replaces:
// 2200-character units, 4 workers, 4 requests per second.
fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "fr".to_string()
}

fn default_file_extensions() -> Vec<String> {
    vec!["md".to_string(), "qmd".to_string(), "txt".to_string()]
}

fn default_chunk_size() -> usize {
    2200
}

fn default_max_workers() -> usize {
    4
}

fn default_rate_limit() -> f64 {
    4.0
}

fn default_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}
