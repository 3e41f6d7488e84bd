//! Mobile menu toggle.

/// Open/closed state of the mobile menu.
///
/// Body scrolling is locked exactly while the menu is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Flips the menu. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Closes the menu, as following one of its links does.
    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn body_scroll_locked(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_locks_scrolling() {
        let mut menu = MobileMenu::default();
        assert!(menu.toggle());
        assert!(menu.body_scroll_locked());
        assert!(!menu.toggle());
        assert!(!menu.body_scroll_locked());
    }

    #[test]
    fn close_is_idempotent() {
        let mut menu = MobileMenu::default();
        menu.toggle();
        menu.close();
        menu.close();
        assert!(!menu.is_open());
    }
}
