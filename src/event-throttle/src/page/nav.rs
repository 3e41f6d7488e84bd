//! Scroll-aware navigation bar.

/// Navigation bar styling state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    scrolled: bool,
}

impl Navigation {
    /// Re-evaluates the `scrolled` style for a page offset.
    ///
    /// Returns true if the style changed.
    pub fn update(&mut self, offset: f64, threshold: f64) -> bool {
        let scrolled = offset > threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    /// Whether the bar currently carries the `scrolled` style.
    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}
