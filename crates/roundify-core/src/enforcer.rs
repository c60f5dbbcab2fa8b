//! Foreground-driven topmost reinforcement.
//!
//! Each overlay owns one [`TopmostEnforcer`]. It sits idle until another
//! window takes the foreground, then re-asserts the overlay's topmost
//! position immediately and on every tick for [`REINFORCE_TICKS`] ticks.
//! Windows that re-raise themselves shortly after losing the foreground
//! are absorbed by the countdown without polling while nothing contends.

use std::time::{Duration, Instant};

use crate::event::ForegroundChange;
use crate::registry::OverlayRegistry;
use crate::timer::RepeatTimer;
use crate::window::Overlay;

/// Ticks of reinforcement after each qualifying foreground change.
pub const REINFORCE_TICKS: u32 = 150;

/// Period between reinforcement ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Per-overlay reinforcement state.
///
/// Invariant: `ticks_remaining > 0` exactly when the repeat timer is
/// running.
#[derive(Debug, Default)]
pub struct TopmostEnforcer {
    ticks_remaining: u32,
    timer: Option<RepeatTimer>,
}

impl TopmostEnforcer {
    /// Creates an idle enforcer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    pub fn is_reinforcing(&self) -> bool {
        self.timer.is_some()
    }

    /// When the next tick is due, if reinforcing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(RepeatTimer::next_deadline)
    }

    /// Handles a foreground change. Returns `true` if it started (or
    /// restarted) reinforcement.
    pub fn on_foreground<W: Overlay + ?Sized>(
        &mut self,
        change: &ForegroundChange,
        registry: &OverlayRegistry,
        window: &W,
        now: Instant,
    ) -> bool {
        if !registry.should_reinforce(change) {
            return false;
        }
        self.start(window, now);
        true
    }

    /// Enters (or restarts) reinforcement: the countdown goes back to
    /// [`REINFORCE_TICKS`] even if a countdown is already running.
    pub fn start<W: Overlay + ?Sized>(&mut self, window: &W, now: Instant) {
        if !self.is_reinforcing() {
            crate::log_debug!("Reinforcing topmost for 0x{:X}", window.id());
        }
        self.ticks_remaining = REINFORCE_TICKS;
        reassert(window);
        self.timer = Some(RepeatTimer::start(TICK_INTERVAL, now));
    }

    /// Fires the tick if one is due. Returns whether a tick ran.
    pub fn poll<W: Overlay + ?Sized>(&mut self, window: &W, now: Instant) -> bool {
        let due = self.timer.as_ref().is_some_and(|t| t.due(now));
        if due {
            self.tick(window, now);
        }
        due
    }

    /// Runs one reinforcement tick.
    pub fn tick<W: Overlay + ?Sized>(&mut self, window: &W, now: Instant) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        if self.ticks_remaining > 0 {
            reassert(window);
            self.ticks_remaining -= 1;
        }
        if self.ticks_remaining == 0 {
            self.timer = None;
        } else {
            timer.advance(now);
        }
    }

    /// Cancels any running countdown.
    pub fn stop(&mut self) {
        self.ticks_remaining = 0;
        self.timer = None;
    }
}

/// Best effort: a failed assertion is retried by the next tick or event.
fn reassert<W: Overlay + ?Sized>(window: &W) {
    if let Err(e) = window.force_topmost() {
        crate::log_debug!("force_topmost 0x{:X} failed: {e}", window.id());
    }
}
