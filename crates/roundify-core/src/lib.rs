pub mod args;
pub mod config;
pub mod enforcer;
pub mod event;
pub mod geometry;
pub mod log;
pub mod overlay;
pub mod rect;
pub mod registry;
pub mod timer;
pub mod window;

#[cfg(test)]
mod fake;

pub use config::Config;
pub use enforcer::{REINFORCE_TICKS, TICK_INTERVAL, TopmostEnforcer};
pub use event::ForegroundChange;
pub use geometry::{Corner, CornerMasks};
pub use overlay::OverlaySet;
pub use rect::Rect;
pub use registry::OverlayRegistry;
pub use window::{Overlay, WindowResult};
