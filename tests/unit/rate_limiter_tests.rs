/*!
 * Tests for the client-side request rate limiter
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use doctrans::errors::PipelineError;
use doctrans::pipeline::RateLimiter;

/// Test that invalid rates are rejected at construction
#[test]
fn test_new_withNonPositiveRate_shouldFailWithInvalidConfig() {
    for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(
            matches!(RateLimiter::new(rate), Err(PipelineError::InvalidConfig(_))),
            "rate {} should be rejected",
            rate
        );
    }
}

/// Test that the grant interval is the inverse of the rate
#[test]
fn test_new_withValidRate_shouldSpaceGrantsByInverseRate() {
    let limiter = RateLimiter::new(4.0).unwrap();
    assert_eq!(limiter.interval(), Duration::from_millis(250));
}

/// Test that the first grant is immediate
#[tokio::test]
async fn test_acquire_withFirstCall_shouldNotWait() {
    let limiter = RateLimiter::new(2.0).unwrap();
    let start = Instant::now();
    limiter.acquire().await;
    assert!(start.elapsed() < Duration::from_millis(100));
}

/// Test that K sequential grants at rate R take at least (K-1)/R seconds
#[tokio::test]
async fn test_acquire_withSequentialGrants_shouldEnforceRate() {
    let limiter = RateLimiter::new(50.0).unwrap();
    let start = Instant::now();
    for _ in 0..5 {
        limiter.acquire().await;
    }
    // 5 grants at 50 req/s cannot finish before 4 * 20ms
    assert!(start.elapsed() >= Duration::from_millis(80));
}

/// Test that concurrent callers are still paced to the configured rate
#[tokio::test]
async fn test_acquire_withConcurrentCallers_shouldEnforceRate() {
    let limiter = Arc::new(RateLimiter::new(100.0).unwrap());
    let start = Instant::now();

    let mut handles = Vec::new();
    for _ in 0..6 {
        let limiter = Arc::clone(&limiter);
        handles.push(tokio::spawn(async move {
            limiter.acquire().await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // 6 grants at 100 req/s cannot finish before 5 * 10ms
    assert!(start.elapsed() >= Duration::from_millis(50));
}
