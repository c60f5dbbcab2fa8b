use std::time::Instant;

use super::*;
use crate::enforcer::{REINFORCE_TICKS, TICK_INTERVAL};
use crate::fake::{Call, CallLog, FakeOverlay, count};
use crate::registry::{TASK_SWITCHER_CLASS, default_ignored_classes};

const DISPLAY: Rect = Rect {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
};

fn make_set(ids: &[usize], radius: f64) -> (OverlaySet<FakeOverlay>, CallLog) {
    let log = CallLog::default();
    let mut set = OverlaySet::new(OverlayRegistry::new(default_ignored_classes()));
    for &id in ids {
        set.insert(FakeOverlay::with_log(id, log.clone()), DISPLAY, radius);
    }
    (set, log)
}

fn foreign() -> ForegroundChange {
    ForegroundChange::new(0xBEEF, "Chrome_WidgetWin_1")
}

// -- insert --

#[test]
fn insert_registers_identity_and_forces_topmost_once() {
    // Act
    let (set, log) = make_set(&[1], 16.0);

    // Assert
    assert!(set.registry().is_own(1));
    assert_eq!(count(&log, 1, Call::Topmost), 1);
    assert_eq!(set.is_reinforcing(1), Some(false));
    assert_eq!(set.bounds(1), Some(DISPLAY));
}

#[test]
fn default_radius_paints_masks_and_shows_window() {
    let (set, log) = make_set(&[1], 16.0);

    assert_eq!(count(&log, 1, Call::Masks(16.0)), 1);
    assert_eq!(count(&log, 1, Call::Show), 1);
    assert_eq!(set.is_visible(1), Some(true));
    assert_eq!(set.radius(1), Some(16.0));
}

#[test]
fn zero_radius_hides_without_painting() {
    let (set, log) = make_set(&[1], 0.0);

    assert_eq!(set.is_visible(1), Some(false));
    assert_eq!(count(&log, 1, Call::Hide), 1);
    assert!(!log.borrow().iter().any(|(_, c)| matches!(c, Call::Masks(_))));
}

// -- set_radius --

#[test]
fn non_positive_radius_hides_regardless_of_prior_state() {
    // Arrange
    let (mut set, log) = make_set(&[1], 16.0);

    // Act / Assert
    for radius in [0.0, -1.0, -250.0] {
        assert!(set.set_radius(1, radius));
        assert_eq!(set.is_visible(1), Some(false));
    }
    assert_eq!(count(&log, 1, Call::Hide), 3);

    // Still hidden when starting from hidden.
    set.set_radius(1, 0.0);
    assert_eq!(set.is_visible(1), Some(false));
}

#[test]
fn positive_radius_after_hidden_repaints_and_shows() {
    let (mut set, log) = make_set(&[1], 0.0);

    set.set_radius(1, 24.5);

    assert_eq!(set.is_visible(1), Some(true));
    assert_eq!(count(&log, 1, Call::Masks(24.5)), 1);
    assert_eq!(set.radius(1), Some(24.5));
}

#[test]
fn set_radius_for_unknown_window_reports_false() {
    let (mut set, _log) = make_set(&[1], 16.0);

    assert!(!set.set_radius(99, 8.0));
}

#[test]
fn set_radius_all_updates_every_overlay() {
    let (mut set, log) = make_set(&[1, 2], 16.0);

    set.set_radius_all(8.0);

    assert_eq!(count(&log, 1, Call::Masks(8.0)), 1);
    assert_eq!(count(&log, 2, Call::Masks(8.0)), 1);
}

// -- dispatch / poll --

#[test]
fn foreground_change_reinforces_every_overlay() {
    // Arrange
    let (mut set, log) = make_set(&[1, 2], 16.0);
    let now = Instant::now();

    // Act
    let started = set.dispatch(&foreign(), now);

    // Assert
    assert_eq!(started, 2);
    assert_eq!(count(&log, 1, Call::Topmost), 2);
    assert_eq!(count(&log, 2, Call::Topmost), 2);
    assert_eq!(set.next_deadline(), Some(now + TICK_INTERVAL));
}

#[test]
fn one_overlay_becoming_foreground_reinforces_nobody() {
    let (mut set, _log) = make_set(&[1, 2], 16.0);

    let started = set.dispatch(&ForegroundChange::new(2, "RoundifyOverlay"), Instant::now());

    assert_eq!(started, 0);
    assert_eq!(set.next_deadline(), None);
}

#[test]
fn task_switcher_reinforces_nobody() {
    let (mut set, _log) = make_set(&[1], 16.0);

    let started = set.dispatch(
        &ForegroundChange::new(0xCAFE, TASK_SWITCHER_CLASS),
        Instant::now(),
    );

    assert_eq!(started, 0);
}

#[test]
fn poll_drives_every_countdown_to_idle() {
    // Arrange
    let (mut set, log) = make_set(&[1, 2], 16.0);
    let mut now = Instant::now();
    set.dispatch(&foreign(), now);

    // Act
    let mut rounds = 0;
    while let Some(deadline) = set.next_deadline() {
        now = deadline;
        assert_eq!(set.poll(now), 2);
        rounds += 1;
    }

    // Assert
    assert_eq!(rounds, REINFORCE_TICKS);
    // Initial force + entry assertion + one per tick.
    assert_eq!(count(&log, 1, Call::Topmost), REINFORCE_TICKS as usize + 2);
    assert_eq!(set.is_reinforcing(1), Some(false));
}

// -- close --

#[test]
fn close_unregisters_and_destroys_the_window() {
    // Arrange
    let (mut set, log) = make_set(&[1, 2], 16.0);

    // Act
    let closed = set.close(1);

    // Assert
    assert!(closed);
    assert!(!set.registry().is_own(1));
    assert!(set.registry().is_own(2));
    assert_eq!(set.len(), 1);
    assert_eq!(log.borrow().last(), Some(&(1, Call::Destroyed)));
}

#[test]
fn window_is_still_alive_when_its_identity_is_unregistered() {
    // Arrange
    let (mut set, log) = make_set(&[1, 2], 16.0);
    set.dispatch(&foreign(), Instant::now());

    // Act
    let window = set.detach(1).expect("overlay 1 exists");

    // Assert
    assert!(!set.registry().is_own(1));
    assert_eq!(set.is_reinforcing(1), None);
    assert_eq!(count(&log, 1, Call::Destroyed), 0);
    drop(window);
    assert_eq!(count(&log, 1, Call::Destroyed), 1);
}

#[test]
fn no_tick_or_notification_reaches_a_closed_overlay() {
    // Arrange
    let (mut set, log) = make_set(&[1], 16.0);
    let now = Instant::now();
    set.dispatch(&foreign(), now);
    let before = count(&log, 1, Call::Topmost);

    // Act
    set.close(1);
    set.poll(now + TICK_INTERVAL);
    set.dispatch(&foreign(), now + TICK_INTERVAL);

    // Assert
    assert_eq!(count(&log, 1, Call::Topmost), before);
    assert_eq!(set.next_deadline(), None);
    assert!(set.is_empty());
}

#[test]
fn closing_an_unknown_overlay_is_a_no_op() {
    let (mut set, _log) = make_set(&[1], 16.0);

    assert!(!set.close(42));
    assert_eq!(set.len(), 1);
}

#[test]
fn dropping_the_set_destroys_every_overlay() {
    // Arrange
    let (set, log) = make_set(&[1, 2, 3], 16.0);

    // Act
    drop(set);

    // Assert
    for id in [1, 2, 3] {
        assert_eq!(count(&log, id, Call::Destroyed), 1);
    }
}
