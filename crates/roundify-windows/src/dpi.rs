use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

/// Declares this process as per-monitor DPI aware (V2).
///
/// Display bounds then come back in physical pixels, so each overlay
/// covers its display exactly and the corner radius is measured in real
/// pixels on mixed-DPI setups.
///
/// Must be called once at startup, before any window is created.
pub fn enable_dpi_awareness() {
    // SAFETY: safe to call once at startup. Failure (e.g. awareness
    // already set by a manifest) leaves the existing mode in place.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}
