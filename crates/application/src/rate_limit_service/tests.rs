use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use vitrin_core::{AppError, AppResult};
use vitrin_domain::{RateLimitConfig, RateLimitKey};

use super::RateLimitService;
use crate::Clock;
use crate::test_support::{FakeClock, TestRateLimitRepository};

fn service() -> (RateLimitService, Arc<FakeClock>) {
    let clock = Arc::new(FakeClock::new());
    let service = RateLimitService::new(
        Arc::new(TestRateLimitRepository::default()),
        clock.clone(),
    );
    (service, clock)
}

fn config(max_attempts: u32, window_seconds: u64) -> RateLimitConfig {
    RateLimitConfig::new(max_attempts, Duration::from_secs(window_seconds))
        .unwrap_or_else(|_| panic!("test"))
}

#[tokio::test]
async fn fresh_identifier_is_allowed_with_one_attempt_used() -> AppResult<()> {
    let (service, _) = service();
    let config = config(4, 60);

    let decision = service.check_rate_limit("api:10.0.0.1:home", &config).await?;

    assert!(decision.success);
    assert_eq!(decision.remaining, 3);
    assert!(decision.error.is_none());
    Ok(())
}

#[tokio::test]
async fn remaining_counts_down_until_limit_then_rejects() -> AppResult<()> {
    let (service, clock) = service();
    let config = config(3, 60);
    let key = "password_change:10.0.0.1:alice";

    let mut remaining = Vec::new();
    for _ in 0..3 {
        let decision = service.check_rate_limit(key, &config).await?;
        assert!(decision.success);
        remaining.push(decision.remaining);
        clock.advance(TimeDelta::seconds(1));
    }
    assert_eq!(remaining, vec![2, 1, 0]);

    let rejected = service.check_rate_limit(key, &config).await?;
    assert!(!rejected.success);
    assert_eq!(rejected.remaining, 0);
    assert_eq!(rejected.retry_after_seconds(), 57);
    Ok(())
}

#[tokio::test]
async fn window_expiry_behaves_like_fresh_identifier() -> AppResult<()> {
    let (service, clock) = service();
    let config = config(2, 30);
    let key = "login:10.0.0.2:bob";

    for _ in 0..3 {
        service.check_rate_limit(key, &config).await?;
    }
    assert!(!service.check_rate_limit(key, &config).await?.success);

    clock.advance(TimeDelta::seconds(30));
    let decision = service.check_rate_limit(key, &config).await?;

    assert!(decision.success);
    assert_eq!(decision.remaining, 1);
    assert_eq!(decision.reset_at, clock.now() + TimeDelta::seconds(30));
    Ok(())
}

#[tokio::test]
async fn reset_clears_prior_attempts() -> AppResult<()> {
    let (service, _) = service();
    let config = config(1, 600);
    let key = "login:10.0.0.3:carol";

    service.check_rate_limit(key, &config).await?;
    assert!(!service.check_rate_limit(key, &config).await?.success);

    service.reset_rate_limit(key).await?;
    let decision = service.check_rate_limit(key, &config).await?;

    assert!(decision.success);
    assert_eq!(decision.remaining, 0);
    Ok(())
}

#[tokio::test]
async fn login_preset_rejects_sixth_attempt_within_fifteen_minutes() -> AppResult<()> {
    let (service, clock) = service();
    let config = RateLimitConfig::login();
    let key = RateLimitKey::new("login", Some("1.2.3.4"), "alice");

    for _ in 0..5 {
        assert!(service.check_rate_limit(key.as_str(), &config).await?.success);
        clock.advance(TimeDelta::seconds(10));
    }

    let sixth = service.check_rate_limit(key.as_str(), &config).await?;
    assert!(!sixth.success);

    let message = sixth.error.unwrap_or_default();
    let seconds: u64 = message
        .split_whitespace()
        .find_map(|word| word.parse().ok())
        .unwrap_or_default();
    assert!(seconds > 0 && seconds <= 900, "unexpected message: {message}");
    Ok(())
}

#[tokio::test]
async fn enforce_maps_rejection_to_rate_limited_error() -> AppResult<()> {
    let (service, _) = service();
    let config = config(1, 120);

    service.enforce("login:10.0.0.4:dave", &config).await?;
    let result = service.enforce("login:10.0.0.4:dave", &config).await;

    assert!(matches!(
        result,
        Err(AppError::RateLimited {
            retry_after_seconds: 120,
            ..
        })
    ));
    Ok(())
}

#[tokio::test]
async fn keys_are_isolated_per_client_and_account() -> AppResult<()> {
    let (service, _) = service();
    let config = config(1, 60);

    service.check_rate_limit("login:10.0.0.5:erin", &config).await?;

    assert!(service.check_rate_limit("login:10.0.0.6:erin", &config).await?.success);
    assert!(service.check_rate_limit("login:10.0.0.5:frank", &config).await?.success);
    Ok(())
}

#[tokio::test]
async fn status_is_read_only_and_hides_expired_entries() -> AppResult<()> {
    let (service, clock) = service();
    let config = config(5, 60);
    let key = "api:10.0.0.7:page-views";

    assert!(service.rate_limit_status(key).await?.is_none());

    service.check_rate_limit(key, &config).await?;
    let first = service.rate_limit_status(key).await?;
    let second = service.rate_limit_status(key).await?;
    assert_eq!(first.map(|entry| entry.count()), Some(1));
    assert_eq!(first, second);

    clock.advance(TimeDelta::seconds(60));
    assert!(service.rate_limit_status(key).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn cleanup_removes_only_expired_entries() -> AppResult<()> {
    let (service, clock) = service();

    service.check_rate_limit("short", &config(5, 10)).await?;
    service.check_rate_limit("long", &config(5, 600)).await?;
    clock.advance(TimeDelta::seconds(11));

    assert_eq!(service.cleanup().await?, 1);
    assert!(service.rate_limit_status("long").await?.is_some());
    Ok(())
}
