//! Headless model of the marketing page's interactive behaviour.
//!
//! Each browser reaction is expressed as a state transition on [`Page`], so
//! event traces can be replayed and inspected without a DOM.

mod anchor;
mod form;
mod glow;
mod menu;
mod nav;
mod reveal;

pub use anchor::anchor_scroll_top;
pub use form::{ContactForm, SENDING_LABEL};
pub use glow::{CursorGlow, GlowPosition};
pub use menu::MobileMenu;
pub use nav::Navigation;
pub use reveal::RevealTracker;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables for the page behaviours.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PageConfig {
    /// Scroll offset past which the navigation bar is styled as scrolled.
    pub scroll_threshold: f64,

    /// Height of the fixed header, kept clear when scrolling to anchors.
    pub header_offset: f64,

    /// Intersection ratio at which animated elements are revealed.
    pub reveal_threshold: f64,

    /// Whether the pointer is precise enough for the cursor glow.
    pub fine_pointer: bool,

    /// Initial label of the contact form's submit button.
    pub submit_label: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            header_offset: 80.0,
            reveal_threshold: 0.1,
            fine_pointer: true,
            submit_label: "Send Message".to_string(),
        }
    }
}

impl PageConfig {
    /// Checks that every tunable is usable.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if !self.scroll_threshold.is_finite() {
            return Err("scroll-threshold must be a finite number".to_string());
        }
        if !self.header_offset.is_finite() {
            return Err("header-offset must be a finite number".to_string());
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(format!(
                "reveal-threshold must be between 0.0 and 1.0, got {}",
                self.reveal_threshold
            ));
        }
        Ok(())
    }
}

/// The page and all of its interactive parts.
#[derive(Debug, Clone)]
pub struct Page {
    config: PageConfig,
    scroll_offset: f64,
    nav: Navigation,
    menu: MobileMenu,
    reveal: RevealTracker,
    glow: CursorGlow,
    form: ContactForm,
    body_loaded: bool,
    body_visible: bool,
}

impl Page {
    /// Creates a page at the top, with nothing loaded yet.
    pub fn new(config: PageConfig) -> Self {
        let form = ContactForm::new(config.submit_label.clone());
        Self {
            config,
            scroll_offset: 0.0,
            nav: Navigation::default(),
            menu: MobileMenu::default(),
            reveal: RevealTracker::default(),
            glow: CursorGlow::default(),
            form,
            body_loaded: false,
            body_visible: false,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Handles a scroll to `offset`. Returns true if the nav style changed.
    pub fn scroll(&mut self, offset: f64) -> bool {
        self.scroll_offset = offset;
        let changed = self.nav.update(offset, self.config.scroll_threshold);
        if changed {
            debug!(offset, scrolled = self.nav.is_scrolled(), "Navigation style changed");
        }
        changed
    }

    /// Handles a click on the mobile menu button. Returns the new open state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu.toggle()
    }

    /// Handles a click on a link inside the mobile menu.
    pub fn click_menu_link(&mut self) {
        self.menu.close();
    }

    /// Handles a click on an in-page anchor.
    ///
    /// `target_top` is the target's viewport-relative top, or `None` when the
    /// anchor points at nothing. Returns the scroll destination, if any.
    pub fn click_anchor(&mut self, target_top: Option<f64>) -> Option<f64> {
        let destination =
            anchor_scroll_top(target_top?, self.scroll_offset, self.config.header_offset);
        self.scroll(destination);
        Some(destination)
    }

    /// Reports an intersection change. Returns true if `id` was just revealed.
    pub fn observe_element(&mut self, id: &str, ratio: f64) -> bool {
        self.reveal.observe(id, ratio, self.config.reveal_threshold)
    }

    /// Handles pointer movement over the hero section.
    ///
    /// Returns the new glow position, or `None` on coarse pointers.
    pub fn move_pointer(
        &mut self,
        client_x: f64,
        client_y: f64,
        hero_left: f64,
        hero_top: f64,
    ) -> Option<GlowPosition> {
        if !self.config.fine_pointer {
            return None;
        }
        Some(self.glow.follow(client_x, client_y, hero_left, hero_top))
    }

    /// Handles a contact form submission. Returns false if already sending.
    pub fn submit_form(&mut self) -> bool {
        self.form.submit()
    }

    /// Marks the document as parsed and performs the initial nav check.
    pub fn dom_content_loaded(&mut self) {
        self.body_loaded = true;
        if self.scroll_offset > self.config.scroll_threshold {
            self.nav.update(self.scroll_offset, self.config.scroll_threshold);
        }
    }

    /// Marks every resource as loaded, making the body visible.
    pub fn load(&mut self) {
        self.body_visible = true;
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            scroll_offset: self.scroll_offset,
            nav_scrolled: self.nav.is_scrolled(),
            menu_open: self.menu.is_open(),
            body_scroll_locked: self.menu.body_scroll_locked(),
            revealed: self.reveal.visible().map(str::to_string).collect(),
            glow: self.glow.position(),
            submit_label: self.form.label().to_string(),
            submit_disabled: self.form.is_sending(),
            body_loaded: self.body_loaded,
            body_visible: self.body_visible,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}

/// Serializable view of a [`Page`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageSnapshot {
    pub scroll_offset: f64,
    pub nav_scrolled: bool,
    pub menu_open: bool,
    pub body_scroll_locked: bool,
    /// Revealed element ids, sorted.
    pub revealed: Vec<String>,
    pub glow: Option<GlowPosition>,
    pub submit_label: String,
    pub submit_disabled: bool,
    pub body_loaded: bool,
    pub body_visible: bool,
}
