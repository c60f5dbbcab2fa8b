use roundify_core::ForegroundChange;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{EVENT_SYSTEM_FOREGROUND, GetClassNameW};

/// Object ID indicating the event applies to the window itself,
/// not a child element like a scrollbar or menu item.
const OBJID_WINDOW: i32 = 0;

/// Longest class name Win32 allows, plus the terminator.
const CLASS_NAME_CAPACITY: usize = 257;

/// Whether a raw WinEvent is a top-level foreground change.
pub fn is_foreground_window_event(event: u32, id_object: i32) -> bool {
    event == EVENT_SYSTEM_FOREGROUND && id_object == OBJID_WINDOW
}

/// Translates a raw Win32 event into a [`ForegroundChange`].
///
/// Returns `None` for anything other than a foreground change on a real
/// top-level window.
pub fn translate(event: u32, hwnd: HWND, id_object: i32) -> Option<ForegroundChange> {
    if !is_foreground_window_event(event, id_object) || hwnd.is_invalid() {
        return None;
    }
    Some(ForegroundChange::new(hwnd.0 as usize, class_name(hwnd)))
}

/// Reads the window class name. A failed lookup yields an empty string,
/// which matches no ignore-list entry.
pub fn class_name(hwnd: HWND) -> String {
    let mut buf = [0u16; CLASS_NAME_CAPACITY];
    // SAFETY: the buffer outlives the call; the length is taken from it.
    let len = unsafe { GetClassNameW(hwnd, &mut buf) };
    if len <= 0 {
        return String::new();
    }
    String::from_utf16_lossy(&buf[..len as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::EVENT_OBJECT_SHOW;

    #[test]
    fn only_top_level_foreground_events_pass() {
        assert!(is_foreground_window_event(EVENT_SYSTEM_FOREGROUND, OBJID_WINDOW));
        assert!(!is_foreground_window_event(EVENT_OBJECT_SHOW, OBJID_WINDOW));
        // OBJID_CLIENT
        assert!(!is_foreground_window_event(EVENT_SYSTEM_FOREGROUND, -4));
    }

    #[test]
    fn null_window_is_not_translated() {
        assert!(translate(EVENT_SYSTEM_FOREGROUND, HWND::default(), OBJID_WINDOW).is_none());
    }
}
