//! Rate limiting ports and application service.
//!
//! Implements a fixed-window counter per caller-composed key. Keys follow the
//! `<action>:<client_ip>:<subject>` convention so limits apply per action,
//! per client and per account.

mod ports;
mod service;

#[cfg(test)]
mod tests;

pub use ports::RateLimitRepository;
pub use service::RateLimitService;
