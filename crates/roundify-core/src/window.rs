use crate::geometry::CornerMasks;

/// A boxed error type for platform operations.
///
/// Every platform failure in Roundify is either fatal at startup or a
/// best-effort no-op at runtime, so callers never need to match on
/// specific variants.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Platform-agnostic overlay window.
///
/// Each platform crate (e.g. `roundify-windows`) provides its own
/// implementation. The overlay set drives it from the UI thread only.
pub trait Overlay {
    /// Returns the opaque window identity (the raw handle value).
    fn id(&self) -> usize;

    /// Moves the window to the top of the z-order without moving,
    /// resizing, or activating it.
    fn force_topmost(&self) -> WindowResult<()>;

    /// Makes the window visible without activating it.
    fn show(&mut self);

    /// Hides the window without destroying it.
    fn hide(&mut self);

    /// Repaints the four corner cut-outs for the given masks.
    fn apply_masks(&mut self, masks: &CornerMasks) -> WindowResult<()>;
}
