use serde::{Deserialize, Deserializer, Serialize};

/// The full candidate profile handed to the renderer.
///
/// Every field defaults to empty so that partially filled profiles render
/// with the corresponding lines or sections omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub personal: PersonalInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub professional_title: String,
    /// Rich text.
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    /// `data:` URI or http(s) URL.
    pub photo_ref: Option<String>,
}

impl PersonalInfo {
    /// "First Last", with either part allowed to be empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_current: bool,
    /// Rich text.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    /// Rich text.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[serde(alias = "debutant", alias = "débutant")]
    Beginner,
    #[serde(alias = "intermediaire", alias = "intermédiaire")]
    Intermediate,
    #[serde(alias = "avance", alias = "avancé")]
    Advanced,
    Expert,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl SkillLevel {
    /// Label printed under the skill name; empty for `Unspecified`.
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Débutant",
            SkillLevel::Intermediate => "Intermédiaire",
            SkillLevel::Advanced => "Avancé",
            SkillLevel::Expert => "Expert",
            SkillLevel::Unspecified => "",
        }
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_with_missing_fields() {
        let doc: CandidateDocument = serde_json::from_str(
            r#"{
                "personal": {"firstName": "Amal", "lastName": "B.", "photoRef": null},
                "experience": [{"position": "Engineer", "isCurrent": true}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.personal.first_name, "Amal");
        assert_eq!(doc.personal.email, "");
        assert!(doc.personal.photo_ref.is_none());
        assert!(doc.experience[0].is_current);
        assert!(doc.education.is_empty());
        assert!(doc.skills.is_empty());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let doc: CandidateDocument = serde_json::from_str(
            r#"{
                "personal": {"firstName": "Amal", "phone": null, "summary": null},
                "experience": [{"position": "Dev", "isCurrent": true, "endDate": null, "description": null}],
                "education": [{"degree": null, "institution": "INSA"}],
                "skills": [{"name": "Rust", "level": null}, {"name": null}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.personal.phone, "");
        assert_eq!(doc.personal.summary, "");
        assert_eq!(doc.experience[0].end_date, "");
        assert!(doc.experience[0].is_current);
        assert_eq!(doc.education[0].degree, "");
        assert_eq!(doc.skills[0].level, SkillLevel::Unspecified);
        assert_eq!(doc.skills[1].name, "");

        let doc: CandidateDocument = serde_json::from_str(
            r#"{"personal": null, "experience": null, "education": null, "skills": null}"#,
        )
        .unwrap();
        assert!(doc.experience.is_empty());
        assert_eq!(doc.personal.first_name, "");
    }

    #[test]
    fn test_skill_level_accepts_aliases_and_unknown_labels() {
        let skills: Vec<Skill> = serde_json::from_str(
            r#"[
                {"name": "Rust", "level": "expert"},
                {"name": "Go", "level": "avance"},
                {"name": "Zig", "level": "wizard"},
                {"name": "C"}
            ]"#,
        )
        .unwrap();
        assert_eq!(skills[0].level, SkillLevel::Expert);
        assert_eq!(skills[1].level, SkillLevel::Advanced);
        assert_eq!(skills[2].level, SkillLevel::Unspecified);
        assert_eq!(skills[3].level, SkillLevel::Unspecified);
        assert_eq!(skills[2].level.label(), "");
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let mut personal = PersonalInfo {
            first_name: "Amal".to_string(),
            last_name: "B.".to_string(),
            ..Default::default()
        };
        assert_eq!(personal.full_name(), "Amal B.");
        personal.last_name.clear();
        assert_eq!(personal.full_name(), "Amal");
    }
}
