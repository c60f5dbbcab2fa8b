use std::collections::HashSet;

use crate::event::ForegroundChange;

/// Window class of the Alt+Tab / Task View surface. It draws above every
/// window while visible and must never be fought for the top position.
pub const TASK_SWITCHER_CLASS: &str = "MultitaskingViewFrame";

/// Returns the default ignore list.
pub fn default_ignored_classes() -> Vec<String> {
    vec![TASK_SWITCHER_CLASS.into()]
}

/// Identities of our own overlay windows plus the window classes whose
/// arrival in the foreground never triggers reinforcement.
///
/// Owned by the overlay set and only touched from the UI thread: written
/// when an overlay is created or torn down, read on every notification.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    own: HashSet<usize>,
    ignored_classes: HashSet<String>,
}

impl OverlayRegistry {
    /// Creates a registry with no overlays and the given closed ignore list.
    pub fn new<I, S>(ignored_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            own: HashSet::new(),
            ignored_classes: ignored_classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Records a freshly created overlay window.
    pub fn register(&mut self, hwnd: usize) {
        self.own.insert(hwnd);
    }

    /// Forgets an overlay window that is about to be destroyed.
    pub fn unregister(&mut self, hwnd: usize) {
        self.own.remove(&hwnd);
    }

    pub fn is_own(&self, hwnd: usize) -> bool {
        self.own.contains(&hwnd)
    }

    /// Class names are compared exactly, as the system reports them.
    pub fn is_ignored(&self, class: &str) -> bool {
        self.ignored_classes.contains(class)
    }

    /// Returns whether a foreground change displaced us and must be answered
    /// with reinforcement.
    pub fn should_reinforce(&self, change: &ForegroundChange) -> bool {
        !self.is_own(change.hwnd) && !self.is_ignored(&change.class)
    }

    pub fn own_count(&self) -> usize {
        self.own.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> OverlayRegistry {
        OverlayRegistry::new(default_ignored_classes())
    }

    #[test]
    fn unrelated_window_triggers_reinforcement() {
        let registry = registry();

        assert!(registry.should_reinforce(&ForegroundChange::new(0x1234, "Notepad")));
    }

    #[test]
    fn own_window_never_triggers_reinforcement() {
        // Arrange
        let mut registry = registry();
        registry.register(0x42);

        // Act / Assert
        assert!(!registry.should_reinforce(&ForegroundChange::new(0x42, "RoundifyOverlay")));
    }

    #[test]
    fn task_switcher_class_is_ignored() {
        let registry = registry();

        assert!(!registry.should_reinforce(&ForegroundChange::new(0x99, TASK_SWITCHER_CLASS)));
    }

    #[test]
    fn ignore_list_is_case_sensitive_and_closed() {
        let registry = registry();

        assert!(registry.should_reinforce(&ForegroundChange::new(0x99, "multitaskingviewframe")));
        assert!(registry.should_reinforce(&ForegroundChange::new(0x99, "Shell_TrayWnd")));
    }

    #[test]
    fn unregistered_window_is_no_longer_own() {
        let mut registry = registry();
        registry.register(0x42);

        registry.unregister(0x42);

        assert!(!registry.is_own(0x42));
        assert_eq!(registry.own_count(), 0);
    }

    #[test]
    fn failed_class_lookup_still_reinforces() {
        assert!(registry().should_reinforce(&ForegroundChange::new(0x7, "")));
    }
}
