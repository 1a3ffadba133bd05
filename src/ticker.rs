//! The single periodic timer driving the game.
//!
//! At most one period is armed at any time. Re-arming replaces the previous
//! schedule outright, so two rates never overlap.

use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default)]
pub struct Ticker {
    period: Option<Duration>,
    next_fire: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Ticker::default()
    }

    pub fn arm(&mut self, period: Duration, now: Instant) {
        self.period = Some(period);
        self.next_fire = Some(now + period);
    }

    pub fn disarm(&mut self) {
        self.period = None;
        self.next_fire = None;
    }

    pub fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Brings the timer in line with the game: disarmed unless running, and
    /// re-armed only when the period actually changed.
    pub fn sync(&mut self, running: bool, period: Duration, now: Instant) {
        match (running, self.period) {
            (false, _) => self.disarm(),
            (true, Some(current)) if current == period => {},
            (true, _) => self.arm(period, now),
        }
    }

    /// Time left before the next fire, or `None` while disarmed.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_fire.map(|next| next.saturating_duration_since(now))
    }

    /// Consumes a due fire and schedules the following one.
    pub fn fire(&mut self, now: Instant) -> bool {
        match (self.next_fire, self.period) {
            (Some(next), Some(period)) if now >= next => {
                self.next_fire = Some(now + period);
                true
            },
            _ => false,
        }
    }
}
