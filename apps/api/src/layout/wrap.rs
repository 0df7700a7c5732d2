//! Wrapped-text writer: greedy word wrap with bullet-aware indentation.
//!
//! # Algorithm
//! - Text is split on `\n`; each line is trimmed.
//! - Empty line → advance by half a line height (paragraph spacing).
//! - `"• "` line → bullet glyph at `x`, the remainder wrapped into
//!   `max_width - BULLET_INDENT`; the first segment shares the glyph's
//!   baseline, continuation segments align under it at `x + BULLET_INDENT`.
//! - Anything else → wrapped into `max_width` at `x`.
//!
//! A single word wider than the column is placed alone on its line and never
//! split.

use crate::layout::font_metrics::get_metrics;
use crate::render::rich_text::BULLET_MARKER;
use crate::render::surface::{Surface, TextStyle};

/// Horizontal offset of bullet text from the bullet glyph, in millimetres.
pub const BULLET_INDENT: f32 = 4.0;

const BULLET_GLYPH: &str = "•";

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap. Returns one string per printed line.
///
/// Widths are measured with the static metric table of `style.face` at
/// `style.size_pt`. An empty or whitespace-only string returns no lines.
pub fn wrap_words(text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![];
    }

    let space_w = get_metrics(style.face).space_mm(style.size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in &words {
        let word_w = style.width_of(word);

        if !current.is_empty() && current_width + space_w + word_w > max_width {
            // Current line is full: push it and start a new one with this word.
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_width += space_w;
            }
            current.push_str(word);
            current_width += word_w;
        }
    }
    lines.push(current);

    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Positioned layout
// ────────────────────────────────────────────────────────────────────────────

/// A run of text with its resolved left edge and baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Lays out flattened text starting at baseline `y`. Returns the placed runs
/// (bullet glyphs included) and the `y` following the last line.
pub fn layout_wrapped(
    text: &str,
    x: f32,
    y: f32,
    max_width: f32,
    line_height: f32,
    style: &TextStyle,
) -> (Vec<PlacedText>, f32) {
    let mut placed = Vec::new();
    let mut y = y;

    for raw in text.split('\n') {
        let line = raw.trim();
        if line.is_empty() {
            y += line_height / 2.0;
            continue;
        }

        if let Some(item) = line.strip_prefix(BULLET_MARKER) {
            placed.push(PlacedText {
                text: BULLET_GLYPH.to_string(),
                x,
                y,
            });
            let indented_x = x + BULLET_INDENT;
            let segments = wrap_words(item, max_width - BULLET_INDENT, style);
            if segments.is_empty() {
                y += line_height;
            }
            for segment in segments {
                placed.push(PlacedText {
                    text: segment,
                    x: indented_x,
                    y,
                });
                y += line_height;
            }
        } else {
            for segment in wrap_words(line, max_width, style) {
                placed.push(PlacedText { text: segment, x, y });
                y += line_height;
            }
        }
    }

    (placed, y)
}

/// Draws flattened text onto the current page and returns the new `y`.
pub fn write_wrapped(
    surface: &mut Surface,
    text: &str,
    x: f32,
    y: f32,
    max_width: f32,
    line_height: f32,
    style: TextStyle,
) -> f32 {
    let (placed, new_y) = layout_wrapped(text, x, y, max_width, line_height, &style);
    for run in placed {
        surface.text(&run.text, run.x, run.y, style);
    }
    new_y
}

/// Height `write_wrapped` would consume for `text`, without drawing.
pub fn measure_wrapped(text: &str, max_width: f32, line_height: f32, style: &TextStyle) -> f32 {
    let (_, end) = layout_wrapped(text, 0.0, 0.0, max_width, line_height, style);
    end
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::FontFace;
    use crate::render::rich_text::flatten;
    use crate::render::surface::DrawCommand;
    use crate::render::theme::Rgb;

    const STYLE: TextStyle = TextStyle::new(FontFace::Regular, 10.0, Rgb(0, 0, 0));

    #[test]
    fn test_wrap_empty_returns_no_lines() {
        assert!(wrap_words("", 100.0, &STYLE).is_empty());
        assert!(wrap_words("   ", 100.0, &STYLE).is_empty());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap_words("Rust engineer", 100.0, &STYLE), vec!["Rust engineer"]);
    }

    #[test]
    fn test_wrap_respects_max_width() {
        let text = "word ".repeat(60);
        let lines = wrap_words(&text, 50.0, &STYLE);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                STYLE.width_of(line) <= 50.0 + 1e-3,
                "line {line:?} exceeds width"
            );
        }
        // No words lost or reordered.
        assert_eq!(lines.join(" "), text.trim());
    }

    #[test]
    fn test_overlong_word_sits_alone_unsplit() {
        let long = "Supercalifragilisticexpialidocious";
        let lines = wrap_words(&format!("a {long} b"), 20.0, &STYLE);
        assert_eq!(lines, vec!["a", long, "b"]);
    }

    #[test]
    fn test_empty_line_advances_half_line() {
        let end = measure_wrapped("A\n\nB", 170.0, 6.0, &STYLE);
        assert!((end - 15.0).abs() < 1e-4, "6 + 3 + 6 expected, got {end}");
    }

    #[test]
    fn test_bullet_lines_share_baseline_and_indent() {
        let flat = flatten("<ul><li>Managed a team of 5</li><li>Shipped 3 releases</li></ul>");
        let (placed, end) = layout_wrapped(&flat, 25.0, 100.0, 160.0, 5.0, &STYLE);

        let glyphs: Vec<&PlacedText> = placed.iter().filter(|p| p.text == "•").collect();
        let texts: Vec<&PlacedText> = placed.iter().filter(|p| p.text != "•").collect();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(texts.len(), 2);

        for (glyph, text) in glyphs.iter().zip(&texts) {
            assert_eq!(glyph.x, 25.0);
            assert_eq!(text.y, glyph.y, "first segment shares the bullet baseline");
            assert_eq!(text.x, 25.0 + BULLET_INDENT);
        }
        assert_eq!(texts[0].text, "Managed a team of 5");
        assert_eq!(texts[1].y, 105.0);
        assert_eq!(end, 110.0);
    }

    #[test]
    fn test_bullet_continuation_lines_keep_indent() {
        let item = format!("• {}", "delivered measurable outcomes ".repeat(8));
        let (placed, _) = layout_wrapped(&item, 20.0, 50.0, 80.0, 5.0, &STYLE);
        let segments: Vec<&PlacedText> = placed.iter().filter(|p| p.text != "•").collect();
        assert!(segments.len() >= 2, "item should wrap");
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.x, 20.0 + BULLET_INDENT);
            assert!((seg.y - (50.0 + 5.0 * i as f32)).abs() < 1e-4);
            assert!(STYLE.width_of(&seg.text) <= 80.0 - BULLET_INDENT + 1e-3);
        }
    }

    #[test]
    fn test_write_wrapped_draws_and_returns_same_y_as_measure() {
        let text = "Intro paragraph that is long enough to wrap across the column at ten points size\n\n• one\n• two";
        let mut surface = Surface::new();
        let end = write_wrapped(&mut surface, text, 20.0, 80.0, 90.0, 5.0, STYLE);
        let height = measure_wrapped(text, 90.0, 5.0, &STYLE);
        assert!((end - 80.0 - height).abs() < 1e-4);

        let drawn = surface.pages()[0]
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        let (placed, _) = layout_wrapped(text, 20.0, 80.0, 90.0, 5.0, &STYLE);
        assert_eq!(drawn, placed.len());
    }
}
