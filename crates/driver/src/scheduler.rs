//! Tick scheduler: one pending deadline, replaceable, stoppable.
//!
//! The scheduler never sleeps or spawns anything. The caller passes the
//! current `Instant` in, which keeps it deterministic under test.

use std::time::{Duration, Instant};

use log::debug;

#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    /// Pending deadline; `None` once stopped.
    next_due: Option<Instant>,
}

impl TickScheduler {
    /// Arm a cadence of `interval_ms` starting at `now`.
    pub fn new(interval_ms: u32, now: Instant) -> Self {
        let interval = interval_from_ms(interval_ms);
        Self {
            interval,
            next_due: Some(now + interval),
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval.as_millis() as u32
    }

    /// Replace the pending deadline with one `interval_ms` from `now`.
    ///
    /// Also re-arms a stopped scheduler.
    pub fn reschedule(&mut self, interval_ms: u32, now: Instant) {
        self.interval = interval_from_ms(interval_ms);
        self.next_due = Some(now + self.interval);
        debug!("tick rescheduled to {}ms", self.interval_ms());
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Consume one due tick, re-arming at `now + interval`.
    ///
    /// Late polls yield a single tick, never a burst of missed ones.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Time left before the next tick; `None` when stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Cancel the pending tick. No tick fires until `reschedule`.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_stopped(&self) -> bool {
        self.next_due.is_none()
    }
}

fn interval_from_ms(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms.max(1)))
}
