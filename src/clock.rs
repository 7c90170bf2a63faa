// src/clock.rs

// time source used by the event limiter

// dependencies
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Abstracts the current time so the limiter can be driven by a controllable clock in tests.
/// `now` returns nanoseconds since an arbitrary fixed origin. A reading earlier than a user's
/// newest recorded call is treated as that call's time.
/// Implementors must be thread-safe (Send + Sync).
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<u64, ClockError>;
}

/// Clock error type
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("system time is before the unix epoch")]
    SystemTimeError,
}

/// Wall clock backed by `SystemTime`, in nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, ClockError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .map_err(|_| ClockError::SystemTimeError)
    }
}
