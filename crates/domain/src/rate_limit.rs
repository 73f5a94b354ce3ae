//! Fixed-window rate limiting rules.
//!
//! A window opens on the first attempt for a key and closes at a fixed
//! instant. Attempts inside the window are counted until the configured
//! maximum is reached; the next attempt after the reset instant opens a fresh
//! window regardless of what is still stored.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use vitrin_core::{AppError, AppResult};

/// Validated limit of attempts per fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    max_attempts: u32,
    window: TimeDelta,
}

impl RateLimitConfig {
    /// Creates a configuration; both values must be positive.
    pub fn new(max_attempts: u32, window: Duration) -> AppResult<Self> {
        if max_attempts == 0 {
            return Err(AppError::Validation(
                "max_attempts must be greater than zero".to_owned(),
            ));
        }

        if window.is_zero() {
            return Err(AppError::Validation(
                "rate limit window must be greater than zero".to_owned(),
            ));
        }

        let window = TimeDelta::from_std(window).map_err(|error| {
            AppError::Validation(format!("rate limit window is out of range: {error}"))
        })?;

        Ok(Self {
            max_attempts,
            window,
        })
    }

    /// Admin login: 5 attempts per 15 minutes.
    #[must_use]
    pub fn login() -> Self {
        Self {
            max_attempts: 5,
            window: TimeDelta::minutes(15),
        }
    }

    /// Password change: 3 attempts per 30 minutes.
    #[must_use]
    pub fn password_change() -> Self {
        Self {
            max_attempts: 3,
            window: TimeDelta::minutes(30),
        }
    }

    /// Public API calls: 100 requests per minute.
    #[must_use]
    pub fn api() -> Self {
        Self {
            max_attempts: 100,
            window: TimeDelta::minutes(1),
        }
    }

    /// Returns the maximum attempts per window.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the window length.
    #[must_use]
    pub fn window(&self) -> TimeDelta {
        self.window
    }
}

/// Attempt counter for one key inside its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    count: u32,
    reset_at: DateTime<Utc>,
}

impl RateLimitEntry {
    /// Opens a new window holding its first attempt.
    #[must_use]
    pub fn open(now: DateTime<Utc>, config: &RateLimitConfig) -> Self {
        Self {
            count: 1,
            reset_at: now + config.window,
        }
    }

    /// Returns the attempts counted in this window.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns the instant at which the window resets.
    #[must_use]
    pub fn reset_at(&self) -> DateTime<Utc> {
        self.reset_at
    }

    /// An expired entry is treated as absent.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.reset_at
    }

    /// Applies one attempt to the stored entry for a key.
    ///
    /// Returns the entry to store afterwards together with the decision.
    /// A rejected attempt leaves the entry untouched.
    #[must_use]
    pub fn register_attempt(
        current: Option<Self>,
        config: &RateLimitConfig,
        now: DateTime<Utc>,
    ) -> (Self, RateLimitDecision) {
        match current {
            Some(entry) if !entry.is_expired(now) => {
                if entry.count < config.max_attempts {
                    let entry = Self {
                        count: entry.count + 1,
                        reset_at: entry.reset_at,
                    };
                    let decision = RateLimitDecision::allowed(
                        config.max_attempts - entry.count,
                        entry.reset_at,
                    );
                    (entry, decision)
                } else {
                    (entry, RateLimitDecision::rejected(entry.reset_at, now))
                }
            }
            _ => {
                let entry = Self::open(now, config);
                let decision =
                    RateLimitDecision::allowed(config.max_attempts - entry.count, entry.reset_at);
                (entry, decision)
            }
        }
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the attempt may proceed.
    pub success: bool,
    /// Attempts left in the current window.
    pub remaining: u32,
    /// Instant at which the window resets.
    pub reset_at: DateTime<Utc>,
    /// Human-readable rejection message.
    pub error: Option<String>,
    retry_after_seconds: u64,
}

impl RateLimitDecision {
    fn allowed(remaining: u32, reset_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            remaining,
            reset_at,
            error: None,
            retry_after_seconds: 0,
        }
    }

    fn rejected(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let retry_after_seconds = seconds_until(reset_at, now);
        Self {
            success: false,
            remaining: 0,
            reset_at,
            error: Some(format!(
                "Too many attempts. Please try again in {retry_after_seconds} seconds."
            )),
            retry_after_seconds,
        }
    }

    /// Whole seconds until the caller may retry, zero when allowed.
    #[must_use]
    pub fn retry_after_seconds(&self) -> u64 {
        self.retry_after_seconds
    }

    /// Converts a rejection into [`AppError::RateLimited`].
    pub fn into_result(self) -> AppResult<Self> {
        if self.success {
            return Ok(self);
        }

        Err(AppError::RateLimited {
            message: self
                .error
                .unwrap_or_else(|| "too many requests, please try again later".to_owned()),
            retry_after_seconds: self.retry_after_seconds,
        })
    }
}

/// Rounds up to whole seconds, never below one.
fn seconds_until(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (reset_at - now).num_milliseconds().max(0);
    let seconds = u64::try_from(millis).unwrap_or_default().div_ceil(1000);
    seconds.max(1)
}

/// Rate limit identifier scoped per action, client and account.
///
/// Rendered as `<action>:<client_ip>:<subject>` so that limits never become
/// global across clients or accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateLimitKey(String);

/// Longest subject kept in a rate limit key, in characters.
pub const RATE_LIMIT_SUBJECT_MAX_CHARS: usize = 64;

impl RateLimitKey {
    /// Builds a key; unknown clients share the `unknown` bucket.
    ///
    /// The subject is truncated to [`RATE_LIMIT_SUBJECT_MAX_CHARS`] so
    /// unvalidated input cannot grow stored keys.
    #[must_use]
    pub fn new(action: &str, client_ip: Option<&str>, subject: &str) -> Self {
        let client_ip = client_ip
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or("unknown");
        let subject = subject
            .trim()
            .chars()
            .take(RATE_LIMIT_SUBJECT_MAX_CHARS)
            .collect::<String>()
            .to_lowercase();

        Self(format!("{action}:{client_ip}:{subject}"))
    }

    /// Returns the composed key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RateLimitKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("test"))
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(RateLimitConfig::new(0, Duration::from_secs(60)).is_err());
        assert!(RateLimitConfig::new(3, Duration::ZERO).is_err());
    }

    #[test]
    fn presets_match_documented_limits() {
        assert_eq!(RateLimitConfig::login().max_attempts(), 5);
        assert_eq!(RateLimitConfig::login().window(), TimeDelta::minutes(15));
        assert_eq!(RateLimitConfig::password_change().max_attempts(), 3);
        assert_eq!(
            RateLimitConfig::password_change().window(),
            TimeDelta::minutes(30)
        );
        assert_eq!(RateLimitConfig::api().max_attempts(), 100);
        assert_eq!(RateLimitConfig::api().window(), TimeDelta::minutes(1));
    }

    #[test]
    fn first_attempt_opens_window() {
        let config = RateLimitConfig::login();
        let (entry, decision) = RateLimitEntry::register_attempt(None, &config, start());

        assert!(decision.success);
        assert_eq!(decision.remaining, 4);
        assert_eq!(entry.count(), 1);
        assert_eq!(entry.reset_at(), start() + TimeDelta::minutes(15));
    }

    #[test]
    fn exhausted_window_rejects_with_retry_delay() {
        let config = RateLimitConfig::new(2, Duration::from_secs(60))
            .unwrap_or_else(|_| panic!("test"));
        let (entry, _) = RateLimitEntry::register_attempt(None, &config, start());
        let (entry, second) = RateLimitEntry::register_attempt(Some(entry), &config, start());
        assert!(second.success);
        assert_eq!(second.remaining, 0);

        let later = start() + TimeDelta::milliseconds(20_500);
        let (entry_after, third) = RateLimitEntry::register_attempt(Some(entry), &config, later);

        assert!(!third.success);
        assert_eq!(third.remaining, 0);
        assert_eq!(third.retry_after_seconds(), 40);
        assert_eq!(
            third.error.as_deref(),
            Some("Too many attempts. Please try again in 40 seconds.")
        );
        assert_eq!(entry_after, entry);
    }

    #[test]
    fn expired_entry_is_replaced() {
        let config = RateLimitConfig::new(1, Duration::from_secs(10))
            .unwrap_or_else(|_| panic!("test"));
        let (entry, _) = RateLimitEntry::register_attempt(None, &config, start());
        let reset = entry.reset_at();

        let (fresh, decision) = RateLimitEntry::register_attempt(Some(entry), &config, reset);

        assert!(decision.success);
        assert_eq!(fresh.count(), 1);
        assert_eq!(fresh.reset_at(), reset + TimeDelta::seconds(10));
    }

    #[test]
    fn rejection_converts_to_rate_limited_error() {
        let config = RateLimitConfig::new(1, Duration::from_secs(30))
            .unwrap_or_else(|_| panic!("test"));
        let (entry, _) = RateLimitEntry::register_attempt(None, &config, start());
        let (_, decision) = RateLimitEntry::register_attempt(Some(entry), &config, start());

        match decision.into_result() {
            Err(AppError::RateLimited {
                retry_after_seconds,
                ..
            }) => assert_eq!(retry_after_seconds, 30),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn key_composes_action_client_and_subject() {
        let key = RateLimitKey::new("login", Some("1.2.3.4"), " Alice ");
        assert_eq!(key.as_str(), "login:1.2.3.4:alice");

        let anonymous = RateLimitKey::new("login", None, "alice");
        assert_eq!(anonymous.as_str(), "login:unknown:alice");
    }

    #[test]
    fn oversized_subject_is_truncated() {
        let subject = "a".repeat(10_000);
        let key = RateLimitKey::new("login", Some("1.2.3.4"), &subject);

        assert_eq!(
            key.as_str(),
            format!("login:1.2.3.4:{}", "a".repeat(RATE_LIMIT_SUBJECT_MAX_CHARS))
        );
    }
}
