use std::fmt;

/// A foreground-change notification, marshalled from the hook thread
/// onto the UI thread.
///
/// The class name is looked up where the notification is raised, so the
/// UI thread never has to call back into the platform to filter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundChange {
    /// Raw handle of the window that became the foreground window.
    pub hwnd: usize,
    /// Its window class name; empty if the lookup failed.
    pub class: String,
}

impl ForegroundChange {
    pub fn new(hwnd: usize, class: impl Into<String>) -> Self {
        Self {
            hwnd,
            class: class.into(),
        }
    }
}

impl fmt::Display for ForegroundChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Foreground 0x{:X} [{}]", self.hwnd, self.class)
    }
}
