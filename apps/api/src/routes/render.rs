use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::candidate::CandidateDocument;
use crate::models::template::TemplateDescriptor;
use crate::render::render_cv;
use crate::state::AppState;

const PAGE_COUNT_HEADER: HeaderName = HeaderName::from_static("x-page-count");

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    pub candidate: Option<CandidateDocument>,
    pub template: Option<TemplateDescriptor>,
}

/// POST /api/v1/render
/// Renders the candidate as a PDF attachment.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let rendered = render_cv(req.candidate, req.template, &state.photos).await?;

    let disposition = HeaderValue::from_str(&content_disposition(&rendered.filename))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
            (PAGE_COUNT_HEADER, HeaderValue::from(rendered.page_count)),
        ],
        rendered.bytes,
    )
        .into_response())
}

/// `attachment` with an ASCII `filename` and the exact UTF-8 name in
/// `filename*`.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}
