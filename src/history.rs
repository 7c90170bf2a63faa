// src/history.rs

// per-user call history for one event

// dependencies
use std::collections::VecDeque;

/// Timestamps (nanoseconds) of the calls counted against one user's window, oldest first.
#[derive(Debug, Clone)]
pub(crate) struct CallHistory {
    calls: VecDeque<u64>,
}

impl CallHistory {
    /// A history holding a single call at `now`.
    pub(crate) fn starting_at(now: u64) -> Self {
        let mut calls = VecDeque::with_capacity(1);
        calls.push_back(now);
        Self { calls }
    }

    /// Drop leading entries strictly older than `floor`. Returns how many were removed.
    pub(crate) fn prune_before(&mut self, floor: u64) -> usize {
        let mut removed = 0;
        while let Some(&oldest) = self.calls.front() {
            if oldest >= floor {
                break;
            }
            self.calls.pop_front();
            removed += 1;
        }
        removed
    }

    pub(crate) fn record(&mut self, now: u64) {
        self.calls.push_back(now);
    }

    pub(crate) fn len(&self) -> usize {
        self.calls.len()
    }

    pub(crate) fn newest(&self) -> Option<u64> {
        self.calls.back().copied()
    }

    /// The `index`-th oldest entry.
    pub(crate) fn nth(&self, index: usize) -> Option<u64> {
        self.calls.get(index).copied()
    }
}
