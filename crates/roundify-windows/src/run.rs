//! The UI-thread loop that owns every overlay.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use roundify_core::{Config, ForegroundChange, OverlaySet, WindowResult};

use crate::event_loop::{self, CHANNEL_CAPACITY, LoopMsg};
use crate::message_pump::drain_messages;
use crate::monitor::enumerate_monitors;
use crate::overlay::{OverlayWindow, take_close_requests};
use crate::{ctrl_c, dpi};

/// Longest wait between two passes over the Win32 message queue while
/// no reinforcement is pending.
const IDLE_PUMP_INTERVAL: Duration = Duration::from_millis(50);

/// Creates one overlay per display and keeps them on top until Ctrl+C
/// or until every overlay has been closed.
pub fn run(radius: f64, config: &Config) -> WindowResult<()> {
    dpi::enable_dpi_awareness();

    let monitors = enumerate_monitors()?;
    if monitors.is_empty() {
        return Err("No displays found".into());
    }

    let mut overlays = OverlaySet::new(config.registry());
    for monitor in &monitors {
        match OverlayWindow::new(monitor.bounds) {
            Ok(window) => {
                overlays.insert(window, monitor.bounds, radius);
            }
            Err(e) => {
                roundify_core::log_warn!("Skipping display {}: {e}", monitor.bounds);
            }
        }
    }
    if overlays.is_empty() {
        return Err("Failed to create any overlay window".into());
    }

    roundify_core::log_info!(
        "Roundify started (PID: {}, radius: {radius}, displays: {})",
        std::process::id(),
        overlays.len()
    );

    let (tx, rx) = mpsc::sync_channel(CHANNEL_CAPACITY);
    let shutdown_tx = tx.clone();
    ctrl_c::set_handler(move || {
        let _ = shutdown_tx.send(LoopMsg::Shutdown);
    })?;
    let event_loop = event_loop::start(tx)?;

    ui_loop(&mut overlays, &rx);

    // No notification may arrive once teardown starts.
    event_loop.stop();
    drop(overlays);

    roundify_core::log_info!("Roundify stopped");
    Ok(())
}

/// One pass per wake-up: wait for a notification or the nearest tick,
/// pump window messages, honour close requests, fan out notifications,
/// then run due ticks.
fn ui_loop(overlays: &mut OverlaySet<OverlayWindow>, rx: &Receiver<LoopMsg>) {
    loop {
        let mut changes = Vec::new();
        let mut shutdown = false;

        match rx.recv_timeout(wait_time(overlays.next_deadline(), Instant::now())) {
            Ok(msg) => collect(msg, &mut changes, &mut shutdown),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => shutdown = true,
        }
        while let Ok(msg) = rx.try_recv() {
            collect(msg, &mut changes, &mut shutdown);
        }

        if shutdown {
            roundify_core::log_info!("Shutdown requested");
            return;
        }
        if !drain_messages() {
            roundify_core::log_info!("WM_QUIT received");
            return;
        }

        for id in take_close_requests() {
            overlays.close(id);
        }
        if overlays.is_empty() {
            roundify_core::log_info!("Every overlay closed");
            return;
        }

        let now = Instant::now();
        for change in &changes {
            let started = overlays.dispatch(change, now);
            if started > 0 {
                roundify_core::log_debug!("{change}: reinforcing {started} overlay(s)");
            }
        }
        overlays.poll(Instant::now());
    }
}

fn collect(msg: LoopMsg, changes: &mut Vec<ForegroundChange>, shutdown: &mut bool) {
    match msg {
        LoopMsg::Foreground(change) => changes.push(change),
        LoopMsg::Shutdown => *shutdown = true,
    }
}

/// Time until the nearest tick, capped at the idle pump interval.
fn wait_time(deadline: Option<Instant>, now: Instant) -> Duration {
    deadline.map_or(IDLE_PUMP_INTERVAL, |d| {
        d.saturating_duration_since(now).min(IDLE_PUMP_INTERVAL)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loop_wakes_at_the_pump_interval() {
        assert_eq!(wait_time(None, Instant::now()), IDLE_PUMP_INTERVAL);
    }

    #[test]
    fn pending_tick_shortens_the_wait() {
        let now = Instant::now();

        assert_eq!(
            wait_time(Some(now + Duration::from_millis(10)), now),
            Duration::from_millis(10)
        );
        assert_eq!(wait_time(Some(now), now + Duration::from_millis(5)), Duration::ZERO);
    }

    #[test]
    fn shutdown_and_changes_are_collected_in_order() {
        // Arrange
        let mut changes = Vec::new();
        let mut shutdown = false;

        // Act
        collect(
            LoopMsg::Foreground(ForegroundChange::new(7, "Notepad")),
            &mut changes,
            &mut shutdown,
        );
        collect(LoopMsg::Shutdown, &mut changes, &mut shutdown);

        // Assert
        assert_eq!(changes, vec![ForegroundChange::new(7, "Notepad")]);
        assert!(shutdown);
    }
}
