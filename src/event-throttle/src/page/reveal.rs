//! Scroll-triggered reveal animations.

use std::collections::BTreeSet;

/// Tracks which animated elements have been revealed.
///
/// Elements are never hidden again once revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    visible: BTreeSet<String>,
}

impl RevealTracker {
    /// Reports an intersection change for `id`.
    ///
    /// Returns true if the element was revealed by this observation.
    pub fn observe(&mut self, id: &str, ratio: f64, threshold: f64) -> bool {
        let intersecting = ratio > 0.0 && ratio >= threshold;
        if !intersecting || self.visible.contains(id) {
            return false;
        }
        self.visible.insert(id.to_string())
    }

    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    /// Revealed element ids, in sorted order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(String::as_str)
    }
}
