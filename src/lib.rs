// src/lib.rs

//! # Event Limiter
//!
//! Per-user, per-event admission control over a rolling time window.
//!
//! Register each throttled action once, then ask the limiter whether a given user may
//! perform it right now.
//!
//! ## Quick Example
//!
//! ```rust
//! use event_limiter::{EventLimiter, SystemClock};
//!
//! let limiter = EventLimiter::new(SystemClock);
//! limiter.register_event("upload", 1, 15.0, true).unwrap();
//!
//! assert!(limiter.check_call("upload", "alice").unwrap());
//! assert!(!limiter.check_call("upload", "alice").unwrap());
//! assert!(limiter.check_call("upload", "bob").unwrap());
//! ```

// private modules
mod clock;
mod config;
mod errors;
mod event_limiter;
mod history;

// public API exports
pub use clock::{Clock, ClockError, SystemClock};
pub use config::EventConfig;
pub use errors::{EventLimiterError, Result};
pub use event_limiter::{CallDecision, EventLimiter};
