//! Drawing surface: records immutable draw commands, one list per page.
//!
//! Every command carries its own style (font, size, color, stroke width), so
//! no drawing state leaks from one call to the next. Coordinates are in
//! millimetres from the top-left corner of an A4 page; the PDF encoder
//! converts them to PDF user space.

use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::render::photo::RasterizedPhoto;
use crate::render::theme::Rgb;

// ────────────────────────────────────────────────────────────────────────────
// Primitive types
// ────────────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in millimetres, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if the two rectangles share interior area (touching edges do not count).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Font, size and color for a single text draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_pt: f32,
    pub color: Rgb,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(face: FontFace, size_pt: f32, color: Rgb) -> Self {
        Self {
            face,
            size_pt,
            color,
            align: Align::Left,
        }
    }

    pub const fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Width of `text` in millimetres in this style.
    pub fn width_of(&self, text: &str) -> f32 {
        get_metrics(self.face).width_mm(text, self.size_pt)
    }
}

/// A single primitive drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
        width: f32,
    },
    /// `x` is the resolved left edge; `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        face: FontFace,
        size_pt: f32,
        color: Rgb,
    },
    /// Index into `Surface::images`.
    Image { rect: Rect, image: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
}

// ────────────────────────────────────────────────────────────────────────────
// Surface
// ────────────────────────────────────────────────────────────────────────────

/// The in-memory document being laid out. Always holds at least one page;
/// draw calls target the last page.
#[derive(Debug, Clone)]
pub struct Surface {
    pages: Vec<Page>,
    images: Vec<RasterizedPhoto>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            images: Vec::new(),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn images(&self) -> &[RasterizedPhoto] {
        &self.images
    }

    /// Starts a new blank page; subsequent draws land on it.
    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, width: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    /// Draws `text` with its baseline at `y`. For `Align::Right` and
    /// `Align::Center`, `x` is the right edge or the center respectively.
    pub fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let left = match style.align {
            Align::Left => x,
            Align::Center => x - style.width_of(text) / 2.0,
            Align::Right => x - style.width_of(text),
        };
        self.push(DrawCommand::Text {
            x: left,
            y,
            text: text.to_string(),
            face: style.face,
            size_pt: style.size_pt,
            color: style.color,
        });
    }

    /// Takes ownership of `image` and places it in `rect` on the current page.
    pub fn image(&mut self, image: RasterizedPhoto, rect: Rect) {
        self.images.push(image);
        let index = self.images.len() - 1;
        self.push(DrawCommand::Image { rect, image: index });
    }

    fn push(&mut self, command: DrawCommand) {
        // `pages` is never empty: `new` seeds one page and nothing removes pages.
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
