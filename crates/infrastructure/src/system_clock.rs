use chrono::{DateTime, Utc};
use vitrin_application::Clock;

/// Wall-clock adapter for the [`Clock`] port.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
