use std::mem;

use roundify_core::{Rect, WindowResult};
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};
use windows::core::BOOL;

/// `MONITORINFO::dwFlags` bit set on the primary display.
const MONITORINFOF_PRIMARY: u32 = 0x1;

/// A connected display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    /// Full bounds of the display in physical pixels, taskbar included.
    pub bounds: Rect,
    /// Bounds minus the taskbar and docked toolbars.
    pub work_area: Rect,
    pub primary: bool,
}

/// Enumerates every connected display.
///
/// Displays whose info cannot be queried are skipped.
pub fn enumerate_monitors() -> WindowResult<Vec<Monitor>> {
    let mut handles: Vec<HMONITOR> = Vec::new();

    // SAFETY: EnumDisplayMonitors calls our callback synchronously for each
    // display. LPARAM carries a pointer to `handles`, which outlives the call.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_callback),
            LPARAM(&mut handles as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        return Err("Failed to enumerate displays".into());
    }

    Ok(handles.into_iter().filter_map(monitor_info).collect())
}

unsafe extern "system" fn enum_monitor_callback(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the `Vec<HMONITOR>` pointer passed by enumerate_monitors().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
    handles.push(monitor);
    BOOL(1) // continue enumerating
}

/// Queries bounds and work area for one display handle.
fn monitor_info(monitor: HMONITOR) -> Option<Monitor> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the struct; cbSize is set as required.
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        return None;
    }

    let (rc, wa) = (info.rcMonitor, info.rcWork);
    Some(Monitor {
        bounds: Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom),
        work_area: Rect::from_edges(wa.left, wa.top, wa.right, wa.bottom),
        primary: info.dwFlags & MONITORINFOF_PRIMARY != 0,
    })
}
