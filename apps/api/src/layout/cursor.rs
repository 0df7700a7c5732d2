//! Page geometry and the layout cursor threaded through every section renderer.
//!
//! All values are millimetres on an A4 page, origin at the top-left.

use crate::render::surface::Surface;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN_X: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;
/// Baseline of the first line on every page after the first.
pub const TOP_MARGIN: f32 = 20.0;
/// Nothing is drawn below this line when it can be avoided.
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - 20.0;
pub const HEADER_HEIGHT: f32 = 60.0;

/// A list item starting below this `y` goes to the next page.
pub const ITEM_BREAK_Y: f32 = 250.0;
/// Section-start thresholds, leaving room for at least one entry.
pub const EXPERIENCE_BREAK_Y: f32 = 240.0;
pub const EDUCATION_BREAK_Y: f32 = 220.0;
pub const SKILLS_BREAK_Y: f32 = 200.0;

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// Mutable drawing position.
///
/// `y` never decreases within a page. A page break increments `page_index`
/// by exactly one and resets `y` to `TOP_MARGIN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub page_index: usize,
    pub x: f32,
    pub y: f32,
    /// Item-level break threshold.
    pub page_height_limit: f32,
    pub left_margin: f32,
    pub right_margin: f32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self {
            page_index: 0,
            x: MARGIN_X,
            y: TOP_MARGIN,
            page_height_limit: ITEM_BREAK_Y,
            left_margin: MARGIN_X,
            right_margin: MARGIN_X,
        }
    }

    pub fn content_width(&self) -> f32 {
        PAGE_WIDTH - self.left_margin - self.right_margin
    }

    pub fn right_edge(&self) -> f32 {
        PAGE_WIDTH - self.right_margin
    }

    /// Moves down to `y`. Requests to move up are ignored.
    pub fn advance_to(&mut self, y: f32) {
        debug_assert!(y >= self.y, "cursor moved up: {} -> {}", self.y, y);
        self.y = self.y.max(y);
    }

    pub fn advance_by(&mut self, dy: f32) {
        self.advance_to(self.y + dy.max(0.0));
    }

    /// True when nothing has been laid out on the current page yet.
    pub fn at_page_top(&self) -> bool {
        self.y <= TOP_MARGIN
    }

    /// Starts a new page on `surface` and moves the cursor to its top.
    pub fn break_page(&mut self, surface: &mut Surface) {
        surface.add_page();
        self.page_index += 1;
        self.x = self.left_margin;
        self.y = TOP_MARGIN;
        tracing::debug!(page = self.page_index, "page break");
    }

    /// Breaks the page if the cursor is already below `threshold`.
    pub fn break_if_below(&mut self, threshold: f32, surface: &mut Surface) -> bool {
        if self.y > threshold {
            self.break_page(surface);
            true
        } else {
            false
        }
    }

    /// Breaks the page before a block of `height` if the cursor is below the
    /// item threshold, or if the block would cross `CONTENT_BOTTOM`. A block
    /// taller than a whole page is drawn from the top of the current page
    /// instead of producing an empty page.
    pub fn ensure_room(&mut self, height: f32, surface: &mut Surface) -> bool {
        let past_limit = self.y > self.page_height_limit;
        let would_overflow = self.y + height > CONTENT_BOTTOM && !self.at_page_top();
        if past_limit || would_overflow {
            self.break_page(surface);
            true
        } else {
            false
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
