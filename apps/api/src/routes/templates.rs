use axum::Json;

use crate::models::template::TemplateDescriptor;
use crate::render::theme::TemplateId;

/// GET /api/v1/templates
/// Lists every template with a dedicated palette.
pub async fn handle_list_templates() -> Json<Vec<TemplateDescriptor>> {
    Json(
        TemplateId::ALL
            .iter()
            .map(|t| TemplateDescriptor {
                id: t.id().to_string(),
                display_name: t.display_name().to_string(),
                visual_style: Some(t.visual_style()),
            })
            .collect(),
    )
}
