#![cfg(windows)]

/// Console Ctrl+C / Ctrl+Break handling.
pub mod ctrl_c;

/// Per-monitor DPI awareness.
pub mod dpi;

/// Translation of raw WinEvents into foreground changes.
pub mod event;

/// Foreground WinEvent hook thread.
pub mod event_loop;

mod message_pump;

/// Display enumeration.
pub mod monitor;

/// Layered click-through overlay window.
pub mod overlay;

/// UI-thread overlay loop.
pub mod run;

pub use monitor::{Monitor, enumerate_monitors};
pub use overlay::OverlayWindow;
