use serde::{Deserialize, Serialize};

use crate::models::candidate::null_as_default;

/// Presentation family a template belongs to. Informational only: rendering is
/// driven by the template id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisualStyle {
    Modern,
    Classic,
    Creative,
    Minimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default)]
    pub visual_style: Option<VisualStyle>,
}
