//! Periodic removal of expired rate limit entries.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};
use vitrin_application::RateLimitService;
use vitrin_core::{AppError, AppResult};

/// Default pause between two sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

struct RunningSweep {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Background task that periodically asks the rate limit service to drop
/// expired counters.
///
/// The sweeper only bounds memory use. Expired entries are already treated
/// as absent by the store, so correctness never depends on it running.
pub struct RateLimitSweeper {
    rate_limit_service: RateLimitService,
    interval: Duration,
    running: Option<RunningSweep>,
}

impl RateLimitSweeper {
    /// Creates a stopped sweeper. The interval must be non-zero.
    pub fn new(rate_limit_service: RateLimitService, interval: Duration) -> AppResult<Self> {
        if interval.is_zero() {
            return Err(AppError::Validation(
                "rate limit sweep interval must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            rate_limit_service,
            interval,
            running: None,
        })
    }

    /// Returns whether the background task is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Spawns the background task. Calling it on a running sweeper is a no-op.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(sweep_loop(
            self.rate_limit_service.clone(),
            self.interval,
            shutdown_rx,
        ));

        info!(
            interval_seconds = self.interval.as_secs(),
            "rate limit sweeper started"
        );
        self.running = Some(RunningSweep { shutdown, handle });
    }

    /// Signals the background task to finish and waits for it.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        let _ = running.shutdown.send(true);
        if let Err(error) = running.handle.await {
            error!(error = %error, "rate limit sweeper task failed");
        }
        info!("rate limit sweeper stopped");
    }
}

impl Drop for RateLimitSweeper {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.handle.abort();
        }
    }
}

async fn sweep_loop(
    rate_limit_service: RateLimitService,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match rate_limit_service.cleanup().await {
                    Ok(0) => {}
                    Ok(removed) => debug!(removed, "removed expired rate limit entries"),
                    Err(error) => error!(error = %error, "rate limit sweep failed"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use vitrin_application::{Clock, RateLimitService};
    use vitrin_core::AppResult;
    use vitrin_domain::RateLimitConfig;

    use super::RateLimitSweeper;
    use crate::InMemoryRateLimitRepository;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Self {
            let start = Utc
                .with_ymd_and_hms(2026, 1, 5, 12, 0, 0)
                .single()
                .unwrap_or_else(|| panic!("test"));
            Self(Mutex::new(start))
        }

        fn advance(&self, delta: TimeDelta) {
            if let Ok(mut now) = self.0.lock() {
                *now += delta;
            }
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.lock().map(|now| *now).unwrap_or_else(|_| Utc::now())
        }
    }

    fn fixture() -> (
        RateLimitService,
        Arc<InMemoryRateLimitRepository>,
        Arc<ManualClock>,
    ) {
        let repository = Arc::new(InMemoryRateLimitRepository::new());
        let clock = Arc::new(ManualClock::new());
        let service = RateLimitService::new(repository.clone(), clock.clone());
        (service, repository, clock)
    }

    #[test]
    fn zero_interval_is_rejected() {
        let (service, _, _) = fixture();
        assert!(RateLimitSweeper::new(service, Duration::ZERO).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sweeps_expired_entries_on_each_tick() -> AppResult<()> {
        let (service, repository, clock) = fixture();
        let config = RateLimitConfig::new(5, Duration::from_secs(60))?;
        service.check_rate_limit("login:1.1.1.1:alice", &config).await?;
        service.check_rate_limit("login:2.2.2.2:bob", &config).await?;

        let mut sweeper = RateLimitSweeper::new(service, Duration::from_secs(300))?;
        sweeper.start();
        assert!(sweeper.is_running());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(repository.len().await, 2);

        clock.advance(TimeDelta::seconds(61));
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert!(repository.is_empty().await);

        sweeper.stop().await;
        assert!(!sweeper.is_running());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_sweeper_leaves_entries_alone() -> AppResult<()> {
        let (service, repository, clock) = fixture();
        let config = RateLimitConfig::new(5, Duration::from_secs(60))?;
        service.check_rate_limit("api:3.3.3.3:feed", &config).await?;

        let mut sweeper = RateLimitSweeper::new(service, Duration::from_secs(300))?;
        sweeper.start();
        sweeper.start();
        sweeper.stop().await;
        sweeper.stop().await;

        clock.advance(TimeDelta::seconds(61));
        tokio::time::sleep(Duration::from_secs(900)).await;

        assert_eq!(repository.len().await, 1);
        Ok(())
    }
}
