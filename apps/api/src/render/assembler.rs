//! Document assembler: resolves the theme, composes every section in order
//! and encodes the result.
//!
//! # Flow
//! 1. Missing candidate → `RenderError::MissingData`.
//! 2. Theme from the template id (default palette when absent or unknown).
//! 3. Photo rasterization (never fails; `None` on any problem).
//! 4. Header, Summary, Experience, Education, Skills on a fresh `Surface`.
//! 5. PDF encoding on the blocking pool.
//!
//! The returned filename and page count let callers build a download
//! response without re-parsing the PDF.

use thiserror::Error;
use tracing::info;

use crate::layout::cursor::PageCursor;
use crate::models::candidate::{CandidateDocument, PersonalInfo};
use crate::models::template::TemplateDescriptor;
use crate::render::pdf::{self, DocumentInfo};
use crate::render::photo::{PhotoLoader, RasterizedPhoto};
use crate::render::sections::{
    render_education, render_experience, render_header, render_skills, render_summary,
};
use crate::render::surface::Surface;
use crate::render::theme::{self, ColorTheme, DEFAULT_THEME};

const FALLBACK_FIRST_NAME: &str = "Candidat";
const FALLBACK_LAST_NAME: &str = "Anonyme";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Missing candidate data")]
    MissingData,

    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("render task failed: {0}")]
    Internal(String),
}

/// A finished document ready to hand to the caller.
#[derive(Debug, Clone)]
pub struct RenderedCv {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub theme: ColorTheme,
}

/// Renders a candidate into a PDF.
///
/// `template` selects the palette and the filename suffix; without it the
/// default palette is used and the filename carries no suffix.
pub async fn render_cv(
    candidate: Option<CandidateDocument>,
    template: Option<TemplateDescriptor>,
    photos: &PhotoLoader,
) -> Result<RenderedCv, RenderError> {
    let candidate = candidate.ok_or(RenderError::MissingData)?;

    let theme = template
        .as_ref()
        .map(|t| theme::resolve(&t.id))
        .unwrap_or(DEFAULT_THEME);
    let filename = derive_filename(&candidate.personal, template.as_ref());

    let photo = photos
        .rasterize(candidate.personal.photo_ref.as_deref())
        .await;

    info!(
        filename = %filename,
        template = template.as_ref().map(|t| t.id.as_str()).unwrap_or("default"),
        has_photo = photo.is_some(),
        experience = candidate.experience.len(),
        education = candidate.education.len(),
        skills = candidate.skills.len(),
        "Rendering CV"
    );

    let (bytes, page_count) = tokio::task::spawn_blocking(move || {
        let surface = compose(&candidate, &theme, photo);
        let info = DocumentInfo {
            title: format!("CV {}", candidate.personal.full_name()).trim().to_string(),
            author: candidate.personal.full_name(),
        };
        let bytes = pdf::encode(&surface, &info)?;
        Ok::<_, RenderError>((bytes, surface.page_count()))
    })
    .await
    .map_err(|e| RenderError::Internal(e.to_string()))??;

    info!(filename = %filename, pages = page_count, bytes = bytes.len(), "CV rendered");

    Ok(RenderedCv {
        filename,
        bytes,
        page_count,
        theme,
    })
}

/// Lays out every section of `candidate` on a new surface, in document order.
pub fn compose(
    candidate: &CandidateDocument,
    theme: &ColorTheme,
    photo: Option<RasterizedPhoto>,
) -> Surface {
    let mut surface = Surface::new();
    let cursor = PageCursor::new();

    let cursor = render_header(&mut surface, cursor, &candidate.personal, photo, theme);
    let cursor = render_summary(&mut surface, cursor, &candidate.personal.summary, theme);
    let cursor = render_experience(&mut surface, cursor, &candidate.experience, theme);
    let cursor = render_education(&mut surface, cursor, &candidate.education, theme);
    let cursor = render_skills(&mut surface, cursor, &candidate.skills, theme);

    debug_assert_eq!(cursor.page_index + 1, surface.page_count());
    surface
}

/// `CV_<First>_<Last>[_<Template_Name>].pdf`, with fixed placeholders for
/// missing name parts and spaces in the template name replaced by `_`.
pub fn derive_filename(personal: &PersonalInfo, template: Option<&TemplateDescriptor>) -> String {
    let first = non_empty(&personal.first_name).unwrap_or(FALLBACK_FIRST_NAME);
    let last = non_empty(&personal.last_name).unwrap_or(FALLBACK_LAST_NAME);

    let mut filename = format!("CV_{first}_{last}");
    if let Some(display) = template.and_then(|t| non_empty(&t.display_name)) {
        filename.push('_');
        filename.push_str(&display.replace(' ', "_"));
    }
    filename.push_str(".pdf");
    filename
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
