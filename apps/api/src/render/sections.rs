//! Section renderers: Header, Summary, Experience, Education, Skills.
//!
//! Each renderer takes the cursor by value and returns it advanced past what
//! it drew. Renderers run strictly in document order; none of them looks at
//! another section's data.

use chrono::NaiveDate;

use crate::layout::cursor::{
    PageCursor, CONTENT_BOTTOM, EDUCATION_BREAK_Y, EXPERIENCE_BREAK_Y, HEADER_HEIGHT,
    PAGE_WIDTH, SKILLS_BREAK_Y,
};
use crate::layout::font_metrics::FontFace;
use crate::layout::wrap::{measure_wrapped, write_wrapped};
use crate::models::candidate::{EducationItem, ExperienceItem, PersonalInfo, Skill};
use crate::render::photo::RasterizedPhoto;
use crate::render::rich_text::flatten;
use crate::render::surface::{Align, Rect, Surface, TextStyle};
use crate::render::theme::{ColorTheme, Rgb};

pub const SUMMARY_TITLE: &str = "Profil";
pub const EXPERIENCE_TITLE: &str = "Expérience professionnelle";
pub const EDUCATION_TITLE: &str = "Formation";
pub const SKILLS_TITLE: &str = "Compétences";
/// End label for a position the candidate still holds.
pub const CURRENT_LABEL: &str = "Présent";

// ── Header geometry ─────────────────────────────────────────────────────────
const NAME_BASELINE: f32 = 25.0;
const TITLE_BASELINE: f32 = 35.0;
const CONTACT_BASELINE: f32 = 52.0;
pub const PHOTO_SIZE_MM: f32 = 36.0;
pub const PHOTO_X: f32 = PAGE_WIDTH - 20.0 - PHOTO_SIZE_MM;
pub const PHOTO_Y: f32 = (HEADER_HEIGHT - PHOTO_SIZE_MM) / 2.0;
const PHOTO_GAP: f32 = 6.0;
/// Cursor position once the header band is done.
const BODY_START_Y: f32 = HEADER_HEIGHT + 15.0;

// ── Body geometry ───────────────────────────────────────────────────────────
const SECTION_TITLE_ADVANCE: f32 = 10.0;
const SECTION_GAP: f32 = 6.0;
const SUMMARY_LINE_HEIGHT: f32 = 6.0;
const ITEM_LINE_HEIGHT: f32 = 5.0;
/// Baseline offsets inside an experience/education item.
const SUBTITLE_OFFSET: f32 = 6.0;
const DESCRIPTION_OFFSET: f32 = 12.0;
/// Space kept below the last baseline of an item (descenders).
const ITEM_DESCENT: f32 = 3.0;
const ITEM_GAP: f32 = 8.0;
const BOX_PADDING: f32 = 5.0;
/// Distance from the accent box top edge to the first baseline.
const BOX_TOP_INSET: f32 = 6.0;

// ── Skills grid ─────────────────────────────────────────────────────────────
pub const SKILL_COLUMNS: usize = 2;
pub const SKILL_COLUMN_GAP: f32 = 10.0;
pub const SKILL_CELL_WIDTH: f32 = 80.0;
pub const SKILL_CELL_HEIGHT: f32 = 15.0;
pub const SKILL_ROW_GAP: f32 = 5.0;

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// Draws the full-width header band: name, title, photo, contact line.
///
/// The photo, when present, takes the right end of the band and narrows the
/// column available to the name and title.
pub fn render_header(
    surface: &mut Surface,
    mut cursor: PageCursor,
    personal: &PersonalInfo,
    photo: Option<RasterizedPhoto>,
    theme: &ColorTheme,
) -> PageCursor {
    surface.fill_rect(
        Rect::new(0.0, 0.0, PAGE_WIDTH, HEADER_HEIGHT),
        theme.header_background,
    );

    let text_right = if photo.is_some() {
        PHOTO_X - PHOTO_GAP
    } else {
        cursor.right_edge()
    };
    let column = text_right - cursor.left_margin;

    let name = personal.full_name();
    let name_style = fit_style(&name, FontFace::Bold, 24.0, 16.0, column, theme.header_text);
    surface.text(&name, cursor.left_margin, NAME_BASELINE, name_style);

    let title = personal.professional_title.trim();
    if !title.is_empty() {
        let title_style = fit_style(title, FontFace::Regular, 14.0, 10.0, column, theme.header_text);
        surface.text(title, cursor.left_margin, TITLE_BASELINE, title_style);
    }

    if let Some(photo) = photo {
        surface.image(photo, Rect::new(PHOTO_X, PHOTO_Y, PHOTO_SIZE_MM, PHOTO_SIZE_MM));
    }

    let contact = [&personal.email, &personal.phone, &personal.address]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");
    if !contact.is_empty() {
        let contact_style = fit_style(&contact, FontFace::Regular, 10.0, 7.0, column, theme.header_text);
        surface.text(&contact, cursor.left_margin, CONTACT_BASELINE, contact_style);
    }

    cursor.advance_to(BODY_START_Y);
    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

/// Draws the summary section. Empty summaries (after flattening) draw nothing.
pub fn render_summary(
    surface: &mut Surface,
    mut cursor: PageCursor,
    summary: &str,
    theme: &ColorTheme,
) -> PageCursor {
    let text = flatten(summary);
    if text.is_empty() {
        return cursor;
    }

    section_title(surface, &mut cursor, SUMMARY_TITLE, theme);
    let style = TextStyle::new(FontFace::Regular, 11.0, theme.body_text);
    let end = write_wrapped(
        surface,
        &text,
        cursor.x,
        cursor.y,
        cursor.content_width(),
        SUMMARY_LINE_HEIGHT,
        style,
    );
    cursor.advance_to(end);
    cursor.advance_by(SECTION_GAP);
    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Draws every experience item inside an accent box sized to its content.
pub fn render_experience(
    surface: &mut Surface,
    mut cursor: PageCursor,
    items: &[ExperienceItem],
    theme: &ColorTheme,
) -> PageCursor {
    if items.is_empty() {
        return cursor;
    }
    let heading = TextStyle::new(FontFace::Bold, 12.0, theme.primary);
    let dates = TextStyle::new(FontFace::Regular, 10.0, theme.secondary).aligned(Align::Right);
    let subtitle = TextStyle::new(FontFace::Oblique, 11.0, theme.secondary);
    let body = TextStyle::new(FontFace::Regular, 10.0, theme.body_text);
    let inner_width = cursor.content_width() - 2.0 * BOX_PADDING;

    // The title moves with the first item so it never ends a page alone.
    let first_extent = item_extent(&flatten(&items[0].description), inner_width, &body);
    cursor.break_if_below(EXPERIENCE_BREAK_Y, surface);
    cursor.ensure_room(SECTION_TITLE_ADVANCE + first_extent, surface);
    section_title(surface, &mut cursor, EXPERIENCE_TITLE, theme);

    for item in items {
        let description = flatten(&item.description);
        let extent = item_extent(&description, inner_width, &body);
        cursor.ensure_room(extent, surface);

        let top = cursor.y;
        let left = cursor.left_margin;
        surface.fill_rect(
            Rect::new(
                left,
                top - BOX_TOP_INSET,
                cursor.content_width(),
                BOX_TOP_INSET + extent,
            ),
            theme.accent_background,
        );

        let inner_x = left + BOX_PADDING;
        surface.text(item.position.trim(), inner_x, top, heading);
        let range = date_range(&item.start_date, &item.end_date, item.is_current);
        surface.text(&range, cursor.right_edge() - BOX_PADDING, top, dates);
        surface.text(item.company.trim(), inner_x, top + SUBTITLE_OFFSET, subtitle);

        if !description.is_empty() {
            write_wrapped(
                surface,
                &description,
                inner_x,
                top + DESCRIPTION_OFFSET,
                inner_width,
                ITEM_LINE_HEIGHT,
                body,
            );
        }

        cursor.advance_to(top + extent + ITEM_GAP);
    }

    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

/// Draws education items: degree left, dates right, institution below.
pub fn render_education(
    surface: &mut Surface,
    mut cursor: PageCursor,
    items: &[EducationItem],
    theme: &ColorTheme,
) -> PageCursor {
    if items.is_empty() {
        return cursor;
    }
    let heading = TextStyle::new(FontFace::Bold, 12.0, theme.primary);
    let dates = TextStyle::new(FontFace::Regular, 10.0, theme.secondary).aligned(Align::Right);
    let subtitle = TextStyle::new(FontFace::Regular, 11.0, theme.secondary);
    let body = TextStyle::new(FontFace::Regular, 10.0, theme.body_text);
    let width = cursor.content_width();

    let first_extent = item_extent(&flatten(&items[0].description), width, &body);
    cursor.break_if_below(EDUCATION_BREAK_Y, surface);
    cursor.ensure_room(SECTION_TITLE_ADVANCE + first_extent, surface);
    section_title(surface, &mut cursor, EDUCATION_TITLE, theme);

    for item in items {
        let description = flatten(&item.description);
        let extent = item_extent(&description, width, &body);
        cursor.ensure_room(extent, surface);

        let top = cursor.y;
        surface.text(item.degree.trim(), cursor.x, top, heading);
        let range = date_range(&item.start_date, &item.end_date, false);
        surface.text(&range, cursor.right_edge(), top, dates);
        surface.text(item.institution.trim(), cursor.x, top + SUBTITLE_OFFSET, subtitle);

        if !description.is_empty() {
            write_wrapped(
                surface,
                &description,
                cursor.x,
                top + DESCRIPTION_OFFSET,
                width,
                ITEM_LINE_HEIGHT,
                body,
            );
        }

        cursor.advance_to(top + extent + ITEM_GAP);
    }

    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Draws skills in a two-column grid of shaded cells, name above level.
pub fn render_skills(
    surface: &mut Surface,
    mut cursor: PageCursor,
    skills: &[Skill],
    theme: &ColorTheme,
) -> PageCursor {
    if skills.is_empty() {
        return cursor;
    }
    cursor.break_if_below(SKILLS_BREAK_Y, surface);
    section_title(surface, &mut cursor, SKILLS_TITLE, theme);

    let name_style = TextStyle::new(FontFace::Bold, 11.0, theme.body_text).aligned(Align::Center);
    let level_style = TextStyle::new(FontFace::Regular, 9.0, theme.secondary).aligned(Align::Center);

    for row in skills.chunks(SKILL_COLUMNS) {
        if cursor.y + SKILL_CELL_HEIGHT > CONTENT_BOTTOM {
            cursor.break_page(surface);
        }

        for (column, skill) in row.iter().enumerate() {
            let cell = Rect::new(
                cursor.left_margin + column as f32 * (SKILL_CELL_WIDTH + SKILL_COLUMN_GAP),
                cursor.y,
                SKILL_CELL_WIDTH,
                SKILL_CELL_HEIGHT,
            );
            surface.fill_rect(cell, theme.accent_background);

            let center = cell.x + cell.width / 2.0;
            let label = skill.level.label();
            if label.is_empty() {
                surface.text(skill.name.trim(), center, cell.y + 9.0, name_style);
            } else {
                surface.text(skill.name.trim(), center, cell.y + 6.5, name_style);
                surface.text(label, center, cell.y + 12.0, level_style);
            }
        }

        cursor.advance_by(SKILL_CELL_HEIGHT + SKILL_ROW_GAP);
    }

    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Title in `primary`, a rule under it, then moves the cursor below both.
fn section_title(surface: &mut Surface, cursor: &mut PageCursor, title: &str, theme: &ColorTheme) {
    let style = TextStyle::new(FontFace::Bold, 16.0, theme.primary);
    surface.text(title, cursor.x, cursor.y, style);
    let rule_y = cursor.y + 2.0;
    surface.line(
        (cursor.left_margin, rule_y),
        (cursor.right_edge(), rule_y),
        theme.primary,
        0.5,
    );
    cursor.advance_by(SECTION_TITLE_ADVANCE);
}

/// Distance from an item's first baseline to the bottom of its content,
/// measured before anything is drawn.
fn item_extent(description: &str, width: f32, body: &TextStyle) -> f32 {
    if description.is_empty() {
        SUBTITLE_OFFSET + ITEM_DESCENT
    } else {
        let height = measure_wrapped(description, width, ITEM_LINE_HEIGHT, body);
        // `height` ends one line height below the last baseline.
        DESCRIPTION_OFFSET + height - ITEM_LINE_HEIGHT + ITEM_DESCENT
    }
}

/// Largest size in `[min, max]` (1pt steps) at which `text` fits `width`.
fn fit_style(text: &str, face: FontFace, max: f32, min: f32, width: f32, color: Rgb) -> TextStyle {
    let mut style = TextStyle::new(face, max, color);
    while style.size_pt > min && style.width_of(text) > width {
        style.size_pt -= 1.0;
    }
    style
}

/// "MM/YYYY - MM/YYYY", with `CURRENT_LABEL` as the end for current roles.
/// Either side may be missing.
pub fn date_range(start: &str, end: &str, is_current: bool) -> String {
    let start = format_date(start);
    let end = if is_current {
        CURRENT_LABEL.to_string()
    } else {
        format_date(end)
    };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start,
        (true, false) => end,
        (false, false) => format!("{start} - {end}"),
    }
}

/// ISO dates (`YYYY-MM-DD` or `YYYY-MM`) become `MM/YYYY`; anything else is
/// shown as typed.
fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"));
    match parsed {
        Ok(date) => date.format("%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::cursor::{ITEM_BREAK_Y, TOP_MARGIN};
    use crate::models::candidate::SkillLevel;
    use crate::render::surface::DrawCommand;
    use crate::render::theme::{resolve, DEFAULT_THEME};

    fn texts_on(surface: &Surface, page: usize) -> Vec<String> {
        surface.pages()[page]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn experience(n: usize) -> Vec<ExperienceItem> {
        (0..n)
            .map(|i| ExperienceItem {
                position: format!("Engineer {i}"),
                company: "Acme".to_string(),
                start_date: "2019-01".to_string(),
                end_date: "2021-06".to_string(),
                is_current: false,
                description: "<ul><li>Managed a team of 5</li><li>Shipped 3 releases</li></ul>"
                    .to_string(),
            })
            .collect()
    }

    fn skills(n: usize) -> Vec<Skill> {
        (0..n)
            .map(|i| Skill {
                name: format!("Skill {i}"),
                level: SkillLevel::Advanced,
            })
            .collect()
    }

    fn fill_rects(surface: &Surface, page: usize, color: Rgb) -> Vec<Rect> {
        surface.pages()[page]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    // ── header ──────────────────────────────────────────────────────────────

    #[test]
    fn test_header_band_and_name() {
        let mut surface = Surface::new();
        let personal = PersonalInfo {
            first_name: "Amal".to_string(),
            last_name: "B.".to_string(),
            ..Default::default()
        };
        let cursor = render_header(&mut surface, PageCursor::new(), &personal, None, &DEFAULT_THEME);

        let band = fill_rects(&surface, 0, DEFAULT_THEME.header_background);
        assert_eq!(band, vec![Rect::new(0.0, 0.0, 210.0, 60.0)]);
        assert_eq!(texts_on(&surface, 0), vec!["Amal B."], "no title, no contact line");
        assert_eq!(cursor.y, BODY_START_Y);
        assert_eq!(cursor.page_index, 0);
    }

    #[test]
    fn test_header_contact_line_skips_missing_parts() {
        let mut surface = Surface::new();
        let personal = PersonalInfo {
            first_name: "Amal".to_string(),
            professional_title: "Backend Engineer".to_string(),
            email: "amal@example.com".to_string(),
            address: "Lyon".to_string(),
            ..Default::default()
        };
        render_header(&mut surface, PageCursor::new(), &personal, None, &DEFAULT_THEME);
        let texts = texts_on(&surface, 0);
        assert!(texts.contains(&"Backend Engineer".to_string()));
        assert!(texts.contains(&"amal@example.com | Lyon".to_string()));
    }

    #[test]
    fn test_header_photo_right_aligned_in_band() {
        let mut surface = Surface::new();
        let photo = RasterizedPhoto {
            width: 96,
            height: 96,
            jpeg: vec![0xFF, 0xD8],
            alpha: vec![255; 96 * 96],
        };
        let personal = PersonalInfo {
            first_name: "Amal".to_string(),
            ..Default::default()
        };
        render_header(&mut surface, PageCursor::new(), &personal, Some(photo), &DEFAULT_THEME);

        let image = surface.pages()[0].commands.iter().find_map(|c| match c {
            DrawCommand::Image { rect, .. } => Some(*rect),
            _ => None,
        });
        let rect = image.expect("photo drawn");
        assert!((rect.right() - 190.0).abs() < 1e-4, "flush with the right margin");
        assert!(rect.y >= 0.0 && rect.bottom() <= HEADER_HEIGHT);
        assert_eq!(surface.images().len(), 1);
    }

    #[test]
    fn test_long_name_shrinks_when_photo_present() {
        let personal = PersonalInfo {
            first_name: "Maximiliana".to_string(),
            last_name: "Vanderbeek-Oppenheimer".to_string(),
            ..Default::default()
        };
        let photo = RasterizedPhoto {
            width: 96,
            height: 96,
            jpeg: vec![],
            alpha: vec![],
        };
        let mut surface = Surface::new();
        render_header(&mut surface, PageCursor::new(), &personal, Some(photo), &DEFAULT_THEME);
        let (x, size, text) = surface.pages()[0]
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { x, size_pt, text, .. } => Some((*x, *size_pt, text.clone())),
                _ => None,
            })
            .unwrap();
        let style = TextStyle::new(FontFace::Bold, size, DEFAULT_THEME.header_text);
        assert!(size < 24.0);
        assert!(x + style.width_of(&text) <= PHOTO_X);
    }

    // ── summary ─────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_summary_draws_nothing() {
        let mut surface = Surface::new();
        let cursor = PageCursor::new();
        let after = render_summary(&mut surface, cursor, "<p>  </p>", &DEFAULT_THEME);
        assert_eq!(after, cursor);
        assert!(surface.pages()[0].commands.is_empty());
    }

    #[test]
    fn test_summary_title_rule_and_text() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(75.0);
        let theme = resolve("modern-blue");
        let after = render_summary(&mut surface, cursor, "<p>Builder of things.</p>", &theme);
        let commands = &surface.pages()[0].commands;
        assert!(matches!(
            &commands[0],
            DrawCommand::Text { text, color, .. } if text == SUMMARY_TITLE && *color == theme.primary
        ));
        assert!(matches!(commands[1], DrawCommand::Line { color, .. } if color == theme.primary));
        assert!(texts_on(&surface, 0).contains(&"Builder of things.".to_string()));
        assert!(after.y > 75.0);
    }

    // ── experience ──────────────────────────────────────────────────────────

    #[test]
    fn test_experience_item_layout() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(75.0);
        let theme = resolve("modern-blue");
        let mut items = experience(1);
        items[0].is_current = true;
        render_experience(&mut surface, cursor, &items, &theme);

        let texts = texts_on(&surface, 0);
        assert!(texts.contains(&EXPERIENCE_TITLE.to_string()));
        assert!(texts.contains(&"Engineer 0".to_string()));
        assert!(texts.contains(&"01/2019 - Présent".to_string()));
        assert!(texts.contains(&"Managed a team of 5".to_string()));
        assert_eq!(texts.iter().filter(|t| *t == "•").count(), 2);

        let boxes = fill_rects(&surface, 0, theme.accent_background);
        assert_eq!(boxes.len(), 1);
        // Every description line lies inside the box.
        for command in &surface.pages()[0].commands {
            if let DrawCommand::Text { y, text, .. } = command {
                if text.starts_with("Managed") || text.starts_with("Shipped") {
                    assert!(*y > boxes[0].y && *y < boxes[0].bottom());
                }
            }
        }
    }

    #[test]
    fn test_experience_paginates() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(75.0);
        let after = render_experience(&mut surface, cursor, &experience(12), &DEFAULT_THEME);

        assert!(after.page_index >= 1);
        assert_eq!(surface.page_count(), after.page_index + 1);
        // Nothing is drawn below the bottom margin on any page.
        for page in surface.pages() {
            for command in &page.commands {
                if let DrawCommand::FillRect { rect, .. } = command {
                    assert!(rect.bottom() <= CONTENT_BOTTOM + 1e-3);
                }
                if let DrawCommand::Text { y, .. } = command {
                    assert!(*y <= CONTENT_BOTTOM);
                }
            }
        }
        // The first item on the second page starts at the top margin.
        let first_on_page_two = surface.pages()[1].commands.iter().find_map(|c| match c {
            DrawCommand::Text { y, .. } => Some(*y),
            _ => None,
        });
        assert_eq!(first_on_page_two, Some(TOP_MARGIN));
    }

    #[test]
    fn test_experience_section_starts_new_page_past_threshold() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(EXPERIENCE_BREAK_Y + 1.0);
        let after = render_experience(&mut surface, cursor, &experience(1), &DEFAULT_THEME);
        assert_eq!(after.page_index, 1);
        assert!(surface.pages()[0].commands.is_empty());
        assert_eq!(texts_on(&surface, 1)[0], EXPERIENCE_TITLE);
    }

    #[test]
    fn test_long_item_moves_to_next_page_instead_of_overflowing() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(200.0);
        let mut items = experience(1);
        items[0].description = format!("<p>{}</p>", "responsible for many things ".repeat(60));
        let after = render_experience(&mut surface, cursor, &items, &DEFAULT_THEME);
        assert_eq!(after.page_index, 1);
        assert!(texts_on(&surface, 1).contains(&"Engineer 0".to_string()));
        assert!(after.y < ITEM_BREAK_Y);
    }

    #[test]
    fn test_experience_title_moves_with_tall_first_item() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(235.0);
        let mut items = experience(1);
        items[0].description = format!("<p>{}</p>", "responsible for many things ".repeat(30));
        let after = render_experience(&mut surface, cursor, &items, &DEFAULT_THEME);

        assert_eq!(after.page_index, 1);
        assert!(surface.pages()[0].commands.is_empty());
        let texts = texts_on(&surface, 1);
        assert_eq!(texts[0], EXPERIENCE_TITLE);
        assert_eq!(texts[1], "Engineer 0");
    }

    #[test]
    fn test_experience_title_stays_when_first_item_fits() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(235.0);
        let after = render_experience(&mut surface, cursor, &experience(1), &DEFAULT_THEME);
        assert_eq!(after.page_index, 0);
        assert_eq!(texts_on(&surface, 0)[0], EXPERIENCE_TITLE);
    }

    // ── education ───────────────────────────────────────────────────────────

    #[test]
    fn test_education_has_no_boxes_and_right_aligned_dates() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(75.0);
        let items = vec![EducationItem {
            degree: "MSc Computer Science".to_string(),
            institution: "INSA Lyon".to_string(),
            start_date: "2015-09".to_string(),
            end_date: "2017-06".to_string(),
            description: String::new(),
        }];
        render_education(&mut surface, cursor, &items, &DEFAULT_THEME);

        assert!(fill_rects(&surface, 0, DEFAULT_THEME.accent_background).is_empty());
        let dates = surface.pages()[0].commands.iter().find_map(|c| match c {
            DrawCommand::Text { x, text, face, size_pt, .. } if text == "09/2015 - 06/2017" => {
                Some(*x + TextStyle::new(*face, *size_pt, DEFAULT_THEME.secondary).width_of(text))
            }
            _ => None,
        });
        assert!((dates.expect("dates drawn") - 190.0).abs() < 1e-3);
    }

    #[test]
    fn test_education_title_moves_with_tall_first_item() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(215.0);
        let items = vec![EducationItem {
            degree: "MSc Computer Science".to_string(),
            institution: "INSA Lyon".to_string(),
            description: format!("<p>{}</p>", "responsible for many things ".repeat(40)),
            ..Default::default()
        }];
        let after = render_education(&mut surface, cursor, &items, &DEFAULT_THEME);

        assert_eq!(after.page_index, 1);
        assert!(surface.pages()[0].commands.is_empty());
        let texts = texts_on(&surface, 1);
        assert_eq!(texts[0], EDUCATION_TITLE);
        assert_eq!(texts[1], "MSc Computer Science");
    }

    // ── skills ──────────────────────────────────────────────────────────────

    #[test]
    fn test_seven_skills_make_four_rows_without_overlap() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(75.0);
        let theme = resolve("creative-orange");
        render_skills(&mut surface, cursor, &skills(7), &theme);

        let cells = fill_rects(&surface, 0, theme.accent_background);
        assert_eq!(cells.len(), 7);

        let mut rows: Vec<f32> = cells.iter().map(|c| c.y).collect();
        rows.dedup();
        assert_eq!(rows.len(), 4);
        let last_row: Vec<&Rect> = cells.iter().filter(|c| c.y == rows[3]).collect();
        assert_eq!(last_row.len(), 1);
        assert_eq!(last_row[0].x, 20.0, "single cell sits in the left column");

        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
            assert!(a.right() <= 190.0 + 1e-3);
        }
    }

    #[test]
    fn test_skill_name_centered_above_level() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(75.0);
        render_skills(&mut surface, cursor, &skills(1), &DEFAULT_THEME);
        let mut name_y = None;
        let mut level_y = None;
        for command in &surface.pages()[0].commands {
            if let DrawCommand::Text { text, y, .. } = command {
                if text == "Skill 0" {
                    name_y = Some(*y);
                }
                if text == "Avancé" {
                    level_y = Some(*y);
                }
            }
        }
        assert!(name_y.unwrap() < level_y.unwrap());
    }

    #[test]
    fn test_skills_section_threshold() {
        let mut surface = Surface::new();
        let mut cursor = PageCursor::new();
        cursor.advance_to(SKILLS_BREAK_Y + 0.5);
        let after = render_skills(&mut surface, cursor, &skills(2), &DEFAULT_THEME);
        assert_eq!(after.page_index, 1);
    }

    // ── dates ───────────────────────────────────────────────────────────────

    #[test]
    fn test_date_range_formats() {
        assert_eq!(date_range("2020-03", "2022-11-15", false), "03/2020 - 11/2022");
        assert_eq!(date_range("2020-03", "", true), "03/2020 - Présent");
        assert_eq!(date_range("", "", false), "");
        assert_eq!(date_range("Spring 2019", "", false), "Spring 2019");
        assert_eq!(date_range("", "2018", false), "2018");
    }
}
