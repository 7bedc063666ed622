//! Per-aircraft alert cooldown tracker

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Suppresses repeat alerts for the same aircraft inside a cooldown window.
///
/// Keyed by lower-cased address. Entries are never expired, only superseded;
/// a home receiver sees at most a few thousand distinct airframes a day.
#[derive(Debug)]
pub struct AlertThrottle {
    cooldown: Duration,
    last_fired: HashMap<String, DateTime<Utc>>,
}

impl AlertThrottle {
    /// Create a throttle with the given cooldown in seconds.
    pub fn new(cooldown_secs: u64) -> Self {
        let secs = i64::try_from(cooldown_secs).unwrap_or(i64::MAX);
        Self {
            cooldown: Duration::try_seconds(secs).unwrap_or(Duration::MAX),
            last_fired: HashMap::new(),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// True if this aircraft has never fired, or last fired strictly more
    /// than the cooldown ago.
    pub fn should_fire(&self, hex: &str, now: DateTime<Utc>) -> bool {
        match self.last_fired.get(&normalize(hex)) {
            None => true,
            Some(last) => now.signed_duration_since(*last) > self.cooldown,
        }
    }

    /// Store `now` as the latest alert time for this aircraft.
    pub fn record(&mut self, hex: &str, now: DateTime<Utc>) {
        self.last_fired.insert(normalize(hex), now);
    }

    /// Check and record in one step. Returns whether the caller may fire.
    pub fn try_claim(&mut self, hex: &str, now: DateTime<Utc>) -> bool {
        if !self.should_fire(hex, now) {
            return false;
        }
        self.record(hex, now);
        true
    }

    pub fn last_fired(&self, hex: &str) -> Option<DateTime<Utc>> {
        self.last_fired.get(&normalize(hex)).copied()
    }

    pub fn len(&self) -> usize {
        self.last_fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_fired.is_empty()
    }
}

fn normalize(hex: &str) -> String {
    hex.trim().to_ascii_lowercase()
}
