//! Decorative glow following the pointer across the hero section.

use serde::Serialize;

/// Glow centre, in pixels from the hero section's top-left corner.
///
/// The glow element is translated by half its size, so this is its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlowPosition {
    pub left: f64,
    pub top: f64,
}

/// Cursor glow state.
#[derive(Debug, Clone, Default)]
pub struct CursorGlow {
    position: Option<GlowPosition>,
}

impl CursorGlow {
    /// Moves the glow under the pointer.
    ///
    /// `client_x`/`client_y` are viewport coordinates; `hero_left`/`hero_top`
    /// locate the hero section in the same space.
    pub fn follow(
        &mut self,
        client_x: f64,
        client_y: f64,
        hero_left: f64,
        hero_top: f64,
    ) -> GlowPosition {
        let position = GlowPosition {
            left: client_x - hero_left,
            top: client_y - hero_top,
        };
        self.position = Some(position);
        position
    }

    #[must_use]
    pub fn position(&self) -> Option<GlowPosition> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_relative_to_hero() {
        let mut glow = CursorGlow::default();
        assert_eq!(glow.position(), None);

        let pos = glow.follow(300.0, 250.0, 100.0, 80.0);
        assert_eq!(pos, GlowPosition { left: 200.0, top: 170.0 });
        assert_eq!(glow.position(), Some(pos));
    }
}
