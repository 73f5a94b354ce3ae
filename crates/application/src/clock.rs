use chrono::{DateTime, Utc};

/// Port for reading the current time.
///
/// Services take the clock as a dependency so tests can drive time
/// deterministically.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
