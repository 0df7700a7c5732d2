//! Color themes: maps a template identifier to its fixed six-color palette.
//!
//! The template table is closed: every known identifier is a `TemplateId`
//! variant with exactly one palette arm, and anything else resolves to
//! `DEFAULT_THEME`. Resolution never fails.

use serde::{Deserialize, Serialize};

use crate::models::template::VisualStyle;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Components scaled to the 0.0–1.0 range used by PDF color operators.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

/// The palette applied to every visual element of one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTheme {
    /// Section titles, separators, positions and degrees.
    pub primary: Rgb,
    /// Dates, company/institution lines, skill levels.
    pub secondary: Rgb,
    pub header_background: Rgb,
    pub header_text: Rgb,
    /// Experience boxes and skill cells.
    pub accent_background: Rgb,
    pub body_text: Rgb,
}

/// Every template the renderer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    ModernBlue,
    ClassicElegant,
    CreativeOrange,
    MinimalGray,
    ProfessionalGreen,
    ElegantPurple,
}

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::ModernBlue,
        TemplateId::ClassicElegant,
        TemplateId::CreativeOrange,
        TemplateId::MinimalGray,
        TemplateId::ProfessionalGreen,
        TemplateId::ElegantPurple,
    ];

    /// Looks up a template by its wire identifier (exact, case-sensitive).
    pub fn from_id(id: &str) -> Option<TemplateId> {
        TemplateId::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            TemplateId::ModernBlue => "modern-blue",
            TemplateId::ClassicElegant => "classic-elegant",
            TemplateId::CreativeOrange => "creative-orange",
            TemplateId::MinimalGray => "minimal-gray",
            TemplateId::ProfessionalGreen => "professional-green",
            TemplateId::ElegantPurple => "elegant-purple",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateId::ModernBlue => "Modern Blue",
            TemplateId::ClassicElegant => "Classic Elegant",
            TemplateId::CreativeOrange => "Creative Orange",
            TemplateId::MinimalGray => "Minimal Gray",
            TemplateId::ProfessionalGreen => "Professional Green",
            TemplateId::ElegantPurple => "Elegant Purple",
        }
    }

    pub fn visual_style(&self) -> VisualStyle {
        match self {
            TemplateId::ModernBlue | TemplateId::ProfessionalGreen => VisualStyle::Modern,
            TemplateId::ClassicElegant | TemplateId::ElegantPurple => VisualStyle::Classic,
            TemplateId::CreativeOrange => VisualStyle::Creative,
            TemplateId::MinimalGray => VisualStyle::Minimal,
        }
    }

    pub fn theme(&self) -> ColorTheme {
        match self {
            TemplateId::ModernBlue => ColorTheme {
                primary: Rgb(37, 99, 235),
                secondary: Rgb(100, 116, 139),
                header_background: Rgb(37, 99, 235),
                header_text: Rgb::WHITE,
                accent_background: Rgb(239, 246, 255),
                body_text: Rgb(31, 41, 55),
            },
            TemplateId::ClassicElegant => ColorTheme {
                primary: Rgb(31, 41, 55),
                secondary: Rgb(107, 114, 128),
                header_background: Rgb(31, 41, 55),
                header_text: Rgb::WHITE,
                accent_background: Rgb(243, 244, 246),
                body_text: Rgb(17, 24, 39),
            },
            TemplateId::CreativeOrange => ColorTheme {
                primary: Rgb(234, 88, 12),
                secondary: Rgb(120, 113, 108),
                header_background: Rgb(234, 88, 12),
                header_text: Rgb::WHITE,
                accent_background: Rgb(255, 247, 237),
                body_text: Rgb(41, 37, 36),
            },
            // Light header: the only template whose header text is dark.
            TemplateId::MinimalGray => ColorTheme {
                primary: Rgb(75, 85, 99),
                secondary: Rgb(156, 163, 175),
                header_background: Rgb(249, 250, 251),
                header_text: Rgb(17, 24, 39),
                accent_background: Rgb(249, 250, 251),
                body_text: Rgb(55, 65, 81),
            },
            TemplateId::ProfessionalGreen => ColorTheme {
                primary: Rgb(5, 150, 105),
                secondary: Rgb(100, 116, 139),
                header_background: Rgb(5, 150, 105),
                header_text: Rgb::WHITE,
                accent_background: Rgb(236, 253, 245),
                body_text: Rgb(31, 41, 55),
            },
            TemplateId::ElegantPurple => ColorTheme {
                primary: Rgb(124, 58, 237),
                secondary: Rgb(107, 114, 128),
                header_background: Rgb(91, 33, 182),
                header_text: Rgb::WHITE,
                accent_background: Rgb(245, 243, 255),
                body_text: Rgb(31, 41, 55),
            },
        }
    }
}

/// Palette used when no template is given or the identifier is unknown.
pub const DEFAULT_THEME: ColorTheme = ColorTheme {
    primary: Rgb(51, 65, 85),
    secondary: Rgb(100, 116, 139),
    header_background: Rgb(30, 41, 59),
    header_text: Rgb::WHITE,
    accent_background: Rgb(241, 245, 249),
    body_text: Rgb(30, 41, 59),
};

// ────────────────────────────────────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────────────────────────────────────

/// Resolves a template identifier to its palette. Total and deterministic.
pub fn resolve(template_id: &str) -> ColorTheme {
    match TemplateId::from_id(template_id) {
        Some(template) => template.theme(),
        None => DEFAULT_THEME,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
