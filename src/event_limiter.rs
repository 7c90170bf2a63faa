// src/event_limiter.rs

// event-limiter: per-user, per-event sliding-window admission control.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::EventConfig;
use crate::errors::{EventLimiterError, Result};
use crate::history::CallHistory;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::{debug, trace};

/// Registered event: its limits plus the call history of every user seen so far.
#[derive(Debug)]
struct EventState {
    config: EventConfig,
    window_nanos: u64,
    histories: DashMap<String, CallHistory>,
}

impl EventState {
    fn new(config: EventConfig) -> Self {
        Self {
            window_nanos: config.window_nanos(),
            config,
            histories: DashMap::new(),
        }
    }

    fn max_calls(&self) -> usize {
        usize::try_from(self.config.max_calls).unwrap_or(usize::MAX)
    }

    // Prune, decide and record against an existing history. `now` is read once by the caller
    // and used for both the window floor and the appended entry.
    fn admit(&self, history: &mut CallHistory, now: u64) -> CallDecision {
        let floor = now.saturating_sub(self.window_nanos);
        history.prune_before(floor);

        let allowed = history.len() < self.max_calls();
        if allowed || self.config.count_invalid_calls {
            history.record(now);
        }

        let retry_after_seconds = if allowed {
            None
        } else {
            Some(self.retry_after_nanos(history, now) as f64 / 1_000_000_000.0)
        };

        CallDecision {
            allowed,
            occupancy: history.len(),
            remaining_calls: self.max_calls().saturating_sub(history.len()),
            retry_after_seconds,
        }
    }

    // Time until enough entries leave the window for one more call to fit.
    fn retry_after_nanos(&self, history: &CallHistory, now: u64) -> u64 {
        let max_calls = self.max_calls();
        if history.len() < max_calls {
            return 0;
        }
        history
            .nth(history.len() - max_calls)
            .map(|blocking| {
                // an entry leaves the window once it is strictly older than the floor
                blocking
                    .saturating_add(self.window_nanos)
                    .saturating_add(1)
                    .saturating_sub(now)
            })
            .unwrap_or(0)
    }
}

/// Per-user, per-event rate limiter over a rolling time window.
///
/// Each registered event carries its own [`EventConfig`]. For every `(event, user)` pair the
/// limiter keeps the timestamps of the calls counted in the user's current window; a call is
/// admitted while fewer than `max_calls` of them are younger than `unit_time`.
///
/// Events live in a `DashMap`, and each event keeps its users in another `DashMap`. A user's
/// history is only mutated while its map entry is held, so concurrent callers see the same
/// admit/reject sequence per user as a single sequential caller would.
///
/// C is the clock type, defaulting to SystemClock.
#[derive(Debug)]
pub struct EventLimiter<C = SystemClock>
where
    C: Clock,
{
    events: DashMap<String, Arc<EventState>>,
    clock: C,
}

impl Default for EventLimiter<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C> EventLimiter<C>
where
    C: Clock,
{
    /// Create an empty limiter reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            events: DashMap::new(),
            clock,
        }
    }

    /// Register `event_key` allowing `max_calls` per `unit_time` seconds for each user.
    ///
    /// When `count_invalid_calls` is true, rejected calls also occupy a slot in the user's
    /// window, so hammering a limited event keeps pushing the lockout forward.
    pub fn register_event(
        &self,
        event_key: &str,
        max_calls: u64,
        unit_time: f64,
        count_invalid_calls: bool,
    ) -> Result<()> {
        let config = EventConfig::new(max_calls, unit_time).count_invalid_calls(count_invalid_calls);
        self.register_event_with_config(event_key, config)
    }

    /// Register `event_key` with a prepared configuration.
    ///
    /// Fails with [`EventLimiterError::DuplicateEvent`] if the key is taken, or with a
    /// validation error if `max_calls` is zero or `unit_time` is not a positive number.
    pub fn register_event_with_config(&self, event_key: &str, config: EventConfig) -> Result<()> {
        match self.events.entry(event_key.to_string()) {
            Entry::Occupied(_) => Err(EventLimiterError::DuplicateEvent(event_key.to_string())),
            Entry::Vacant(slot) => {
                config.validate()?;
                debug!(
                    event = event_key,
                    max_calls = config.max_calls,
                    unit_time = config.unit_time,
                    count_invalid_calls = config.count_invalid_calls,
                    "Registered event"
                );
                slot.insert(Arc::new(EventState::new(config)));
                Ok(())
            }
        }
    }

    /// Decide whether `user_id` may perform `event_key` now, recording the call.
    pub fn check_call(&self, event_key: &str, user_id: &str) -> Result<bool> {
        self.evaluate_call(event_key, user_id)
            .map(|decision| decision.allowed)
    }

    /// Same as [`check_call`](Self::check_call), returning the decision with its metadata.
    pub fn evaluate_call(&self, event_key: &str, user_id: &str) -> Result<CallDecision> {
        let event = self.event(event_key)?;

        // the clock is read while the user's entry is held, so entries land in read order
        let decision = match event.histories.entry(user_id.to_string()) {
            Entry::Vacant(slot) => {
                let now = self.clock.now()?;
                slot.insert(CallHistory::starting_at(now));
                CallDecision::first_call(event.max_calls())
            }
            Entry::Occupied(mut slot) => {
                let history = slot.get_mut();
                // a clock stepping backwards must not record behind the newest entry
                let now = self.clock.now()?.max(history.newest().unwrap_or(0));
                event.admit(history, now)
            }
        };

        if decision.allowed {
            trace!(
                event = event_key,
                user = user_id,
                occupancy = decision.occupancy,
                "Call admitted"
            );
        } else {
            debug!(
                event = event_key,
                user = user_id,
                occupancy = decision.occupancy,
                retry_after_seconds = decision.retry_after_seconds,
                "Call rejected"
            );
        }

        Ok(decision)
    }

    /// Configuration of a registered event.
    pub fn event_config(&self, event_key: &str) -> Option<EventConfig> {
        self.events
            .get(event_key)
            .map(|event| event.config.clone())
    }

    pub fn is_registered(&self, event_key: &str) -> bool {
        self.events.contains_key(event_key)
    }

    /// Number of registered events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of users with a history under `event_key`.
    pub fn tracked_users(&self, event_key: &str) -> Result<usize> {
        Ok(self.event(event_key)?.histories.len())
    }

    /// Forget users whose most recent counted call is older than `max_idle_nanos`.
    ///
    /// The idle threshold is never shorter than the event's window, so an evicted user is
    /// always one whose next call would have been admitted anyway. Returns the number of
    /// histories removed across all events.
    pub fn cleanup_idle_users(&self, max_idle_nanos: u64) -> Result<usize> {
        let now = self.clock.now()?;
        let mut removed = 0;

        for event in self.events.iter() {
            let cutoff = now.saturating_sub(max_idle_nanos.max(event.window_nanos));
            event.histories.retain(|_, history| {
                let keep = history.newest().is_some_and(|newest| newest >= cutoff);
                if !keep {
                    removed += 1;
                }
                keep
            });
        }

        debug!(removed, "Cleaned up idle users");
        Ok(removed)
    }

    fn event(&self, event_key: &str) -> Result<Arc<EventState>> {
        self.events
            .get(event_key)
            .map(|event| Arc::clone(event.value()))
            .ok_or_else(|| EventLimiterError::UnknownEvent(event_key.to_string()))
    }
}

/// Outcome of a call check.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDecision {
    /// Whether the call may proceed
    pub allowed: bool,
    /// Entries counted in the user's window once this call was accounted for
    pub occupancy: usize,
    /// Calls still available in the current window
    pub remaining_calls: usize,
    /// Seconds until another call would fit in the window (when rejected)
    pub retry_after_seconds: Option<f64>,
}

impl CallDecision {
    fn first_call(max_calls: usize) -> Self {
        Self {
            allowed: true,
            occupancy: 1,
            remaining_calls: max_calls.saturating_sub(1),
            retry_after_seconds: None,
        }
    }
}
