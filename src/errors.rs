// src/errors.rs

// error handling for the event limiter

// dependencies
use thiserror::Error;

use crate::clock::ClockError;

/// Errors surfaced by [`EventLimiter`](crate::EventLimiter) operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventLimiterError {
    /// `register_event` was called with a key that is already registered.
    #[error("event '{0}' is already registered")]
    DuplicateEvent(String),
    /// A call was checked against a key that was never registered.
    #[error("event '{0}' is not registered")]
    UnknownEvent(String),
    #[error("max_calls must be at least 1")]
    InvalidMaxCalls,
    #[error("unit_time must be a finite number of seconds greater than zero")]
    InvalidUnitTime,
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),
}

pub type Result<T> = std::result::Result<T, EventLimiterError>;
