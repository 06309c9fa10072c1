/*!
 * Common test utilities for the doctrans test suite
 */

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use doctrans::pipeline::{RateLimiter, TranslationUnit};
use doctrans::providers::Provider;
use doctrans::translation::{TranslationCache, TranslationClient};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small Markdown document with prose, a code fence and math
pub fn sample_document() -> &'static str {
    "# Title\n\nFirst paragraph of prose.\n\n```rust\nlet answer = 42;\n```\n\nSecond paragraph of prose.\n\n$$\nE = mc^2\n$$\n\nClosing words.\n"
}

/// Builds a translation unit for client tests
pub fn make_unit(index: usize, text: &str, target_language: &str) -> TranslationUnit {
    TranslationUnit {
        index,
        source_text: text.to_string(),
        target_language: target_language.to_string(),
    }
}

/// Builds a translation client over the given provider with a fast rate
/// limit and negligible backoff, so retry tests finish quickly
pub fn make_client<P: Provider>(provider: Arc<P>, retries: u32) -> Result<TranslationClient<P>> {
    let limiter = Arc::new(RateLimiter::new(1000.0)?);
    Ok(TranslationClient::new(
        provider,
        limiter,
        TranslationCache::default(),
        retries,
        1,
    ))
}
