use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_PERSONA: &str = "Default Writer";
pub const DEFAULT_TONE: &str = "Neutral";

/// A user's writing style, supplied whole with every request.
///
/// Defaults are resolved once here, at the deserialization boundary: a missing
/// key, `null`, or a blank string all fall back to the default, so operations
/// never re-derive them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStyleProfile", rename_all = "camelCase")]
pub struct StyleProfile {
    pub persona: String,
    pub tone: String,
    pub style_traits: Vec<String>,
    pub sample_text: String,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            tone: DEFAULT_TONE.to_string(),
            style_traits: Vec::new(),
            sample_text: String::new(),
        }
    }
}

/// Loose inbound shape; every field may be absent or null.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStyleProfile {
    persona: Option<String>,
    tone: Option<String>,
    style_traits: Option<Vec<String>>,
    sample_text: Option<String>,
}

impl From<RawStyleProfile> for StyleProfile {
    fn from(raw: RawStyleProfile) -> Self {
        Self {
            persona: non_blank(raw.persona).unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
            tone: non_blank(raw.tone).unwrap_or_else(|| DEFAULT_TONE.to_string()),
            style_traits: raw
                .style_traits
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            sample_text: raw.sample_text.unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Row shape of the `user_profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub persona: Option<String>,
    pub tone: Option<String>,
    pub style_traits: Vec<String>,
    pub sample_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A profile as served by the profile routes: the store id plus the style.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: StyleProfile,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileRow> for StoredProfile {
    fn from(row: ProfileRow) -> Self {
        let profile = StyleProfile::from(RawStyleProfile {
            persona: row.persona,
            tone: row.tone,
            style_traits: Some(row.style_traits),
            sample_text: row.sample_text,
        });
        Self {
            id: row.id,
            profile,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_take_defaults() {
        let profile: StyleProfile = serde_json::from_value(json!({})).unwrap();
        assert_eq!(profile, StyleProfile::default());
    }

    #[test]
    fn test_null_and_blank_fields_take_defaults() {
        let profile: StyleProfile = serde_json::from_value(json!({
            "persona": null,
            "tone": "   ",
            "styleTraits": null,
            "sampleText": null
        }))
        .unwrap();
        assert_eq!(profile.persona, DEFAULT_PERSONA);
        assert_eq!(profile.tone, DEFAULT_TONE);
        assert!(profile.style_traits.is_empty());
        assert_eq!(profile.sample_text, "");
    }

    #[test]
    fn test_camel_case_fields_and_unknown_keys() {
        let profile: StyleProfile = serde_json::from_value(json!({
            "_id": "665f1c2e9b1e8a0012345678",
            "persona": "Tech Blogger",
            "tone": "Casual",
            "styleTraits": ["short sentences", "", "  uses analogies "],
            "sampleText": "Ever wondered why your build is slow?"
        }))
        .unwrap();
        assert_eq!(profile.persona, "Tech Blogger");
        assert_eq!(profile.tone, "Casual");
        assert_eq!(
            profile.style_traits,
            vec!["short sentences".to_string(), "uses analogies".to_string()]
        );
        assert_eq!(profile.sample_text, "Ever wondered why your build is slow?");
    }

    #[test]
    fn test_stored_profile_flattens_style_fields() {
        let row = ProfileRow {
            id: Uuid::new_v4(),
            persona: Some("Academic".to_string()),
            tone: None,
            style_traits: vec!["formal".to_string()],
            sample_text: None,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(StoredProfile::from(row)).unwrap();
        assert_eq!(value["persona"], "Academic");
        assert_eq!(value["tone"], DEFAULT_TONE);
        assert_eq!(value["styleTraits"], json!(["formal"]));
        assert!(value.get("createdAt").is_some());
    }
}
