/*!
 * Tests for the per-unit translation client and its retry policy
 */

use std::sync::Arc;

use anyhow::Result;
use doctrans::errors::ProviderError;
use doctrans::providers::mock::MockProvider;

use crate::common;

/// Test that a working provider succeeds on the first attempt
#[tokio::test]
async fn test_translate_unit_withWorkingProvider_shouldSucceedFirstAttempt() -> Result<()> {
    let provider = Arc::new(MockProvider::working());
    let client = common::make_client(Arc::clone(&provider), 3)?;
    let unit = common::make_unit(0, "Hello world.", "fr");

    let result = client.translate_unit(&unit, "en").await.unwrap();

    assert_eq!(result.index, 0);
    assert_eq!(result.attempts, 1);
    assert_eq!(result.translated_text, "[fr] Hello world.");
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

/// Test that transient failures are retried until success
#[tokio::test]
async fn test_translate_unit_withTwoTransientFailures_shouldSucceedOnThirdAttempt() -> Result<()> {
    let provider = Arc::new(MockProvider::fail_first(2));
    let client = common::make_client(Arc::clone(&provider), 3)?;
    let unit = common::make_unit(0, "Hello again.", "fr");

    let result = client.translate_unit(&unit, "en").await.unwrap();

    assert_eq!(result.attempts, 3);
    assert_eq!(provider.call_count(), 3);
    Ok(())
}

/// Test that a permanent error fails the unit without any retry
#[tokio::test]
async fn test_translate_unit_withPermanentError_shouldFailWithoutRetry() -> Result<()> {
    let provider = Arc::new(MockProvider::failing_permanent());
    let client = common::make_client(Arc::clone(&provider), 3)?;
    let unit = common::make_unit(7, "Doomed text.", "fr");

    let failure = client.translate_unit(&unit, "en").await.unwrap_err();

    assert_eq!(failure.index, 7);
    assert_eq!(failure.attempts, 1);
    assert!(matches!(failure.error, ProviderError::Client { .. }));
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

/// Test that retry exhaustion fails the unit with the last transient error
#[tokio::test]
async fn test_translate_unit_withExhaustedRetries_shouldFailWithLastError() -> Result<()> {
    let provider = Arc::new(MockProvider::failing_transient());
    let client = common::make_client(Arc::clone(&provider), 2)?;
    let unit = common::make_unit(0, "Still doomed.", "fr");

    let failure = client.translate_unit(&unit, "en").await.unwrap_err();

    // First attempt plus two retries
    assert_eq!(failure.attempts, 3);
    assert!(failure.error.is_transient());
    assert_eq!(provider.call_count(), 3);
    Ok(())
}

/// Test that a repeated unit hits the cache with zero API attempts
#[tokio::test]
async fn test_translate_unit_withRepeatedText_shouldHitCache() -> Result<()> {
    let provider = Arc::new(MockProvider::working());
    let client = common::make_client(Arc::clone(&provider), 3)?;
    let unit = common::make_unit(0, "Same text.", "fr");

    let first = client.translate_unit(&unit, "en").await.unwrap();
    let second = client.translate_unit(&unit, "en").await.unwrap();

    assert_eq!(first.attempts, 1);
    assert_eq!(second.attempts, 0);
    assert_eq!(second.translated_text, first.translated_text);
    // The second call never reached the provider
    assert_eq!(provider.call_count(), 1);

    let (hits, misses, _) = client.cache().stats();
    assert_eq!(hits, 1);
    assert_eq!(misses, 1);
    Ok(())
}

/// Test that the cache grows by one entry per distinct unit
#[tokio::test]
async fn test_translate_unit_withDistinctTexts_shouldFillCache() -> Result<()> {
    let provider = Arc::new(MockProvider::working());
    let client = common::make_client(provider, 0)?;
    assert!(client.cache().is_empty());

    client
        .translate_unit(&common::make_unit(0, "First text.", "fr"), "en")
        .await
        .unwrap();
    client
        .translate_unit(&common::make_unit(1, "Second text.", "fr"), "en")
        .await
        .unwrap();

    assert_eq!(client.cache().len(), 2);
    assert!(!client.cache().is_empty());
    Ok(())
}

/// Test that inline code spans survive translation untouched
#[tokio::test]
async fn test_translate_unit_withInlineCode_shouldPreserveSpans() -> Result<()> {
    let provider = Arc::new(MockProvider::working());
    let client = common::make_client(provider, 0)?;
    let unit = common::make_unit(0, "Call `foo()` and $x+y$ here.", "fr");

    let result = client.translate_unit(&unit, "en").await.unwrap();

    assert!(result.translated_text.contains("`foo()`"));
    assert!(result.translated_text.contains("$x+y$"));
    Ok(())
}
