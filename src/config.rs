// src/config.rs

//! Per-event limit configuration

// dependencies
use crate::errors::EventLimiterError;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Limit settings for a single registered event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventConfig {
    pub(crate) max_calls: u64,
    pub(crate) unit_time: f64,
    pub(crate) count_invalid_calls: bool,
}

impl EventConfig {
    /// Create a configuration allowing `max_calls` per `unit_time` seconds.
    /// Rejected calls are counted against the window unless turned off with
    /// [`count_invalid_calls`](Self::count_invalid_calls).
    pub fn new(max_calls: u64, unit_time: f64) -> Self {
        Self {
            max_calls,
            unit_time,
            count_invalid_calls: true,
        }
    }

    /// Builder-style: set the maximum number of calls per window
    pub fn max_calls(mut self, max_calls: u64) -> Self {
        self.max_calls = max_calls;
        self
    }

    /// Builder-style: set the window length in seconds
    pub fn unit_time(mut self, unit_time: f64) -> Self {
        self.unit_time = unit_time;
        self
    }

    /// Builder-style: choose whether rejected calls occupy a slot in the window
    pub fn count_invalid_calls(mut self, count_invalid_calls: bool) -> Self {
        self.count_invalid_calls = count_invalid_calls;
        self
    }

    pub fn get_max_calls(&self) -> u64 {
        self.max_calls
    }

    pub fn get_unit_time(&self) -> f64 {
        self.unit_time
    }

    pub fn counts_invalid_calls(&self) -> bool {
        self.count_invalid_calls
    }

    /// Window length in whole nanoseconds.
    pub(crate) fn window_nanos(&self) -> u64 {
        (self.unit_time * NANOS_PER_SECOND) as u64
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), EventLimiterError> {
        if self.max_calls == 0 {
            return Err(EventLimiterError::InvalidMaxCalls);
        }
        if !self.unit_time.is_finite() || self.unit_time <= 0.0 || self.window_nanos() == 0 {
            return Err(EventLimiterError::InvalidUnitTime);
        }
        Ok(())
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self::new(10, 60.0)
    }
}
