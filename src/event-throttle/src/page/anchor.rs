//! In-page anchor scrolling.

/// Computes where the page should scroll to bring an anchor target into view.
///
/// `element_top` is the target's top relative to the viewport, `page_offset`
/// the current vertical scroll position. The fixed header's height is
/// subtracted so the target is not hidden underneath it.
#[must_use]
pub fn anchor_scroll_top(element_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    element_top + page_offset - header_offset
}
