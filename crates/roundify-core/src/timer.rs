use std::time::{Duration, Instant};

/// A cancellable fixed-interval schedule.
///
/// It never fires on its own: the UI loop asks for the next deadline,
/// sleeps until then, and calls [`RepeatTimer::due`]. Dropping the timer
/// cancels it, so a stopped timer can never produce a late tick.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    interval: Duration,
    next: Instant,
}

impl RepeatTimer {
    /// Starts a schedule whose first tick is one interval after `now`.
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Returns whether a tick is due at `now`.
    pub fn due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Schedules the following tick after one has fired.
    ///
    /// Missed intervals are not replayed: a late loop gets one tick and the
    /// schedule restarts from `now`.
    pub fn advance(&mut self, now: Instant) {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }
}
