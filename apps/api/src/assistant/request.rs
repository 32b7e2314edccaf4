//! Inbound request envelope and the per-tool context shaping done before delegation.

use serde::{Deserialize, Deserializer};

use crate::models::profile::StyleProfile;

const UNKNOWN_TOPIC: &str = "Unknown";
const GENERAL_CATEGORY: &str = "General";

/// Body of `POST /api/writing/assist`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingRequest {
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub draft_content: String,
    /// Absent, `null` or blank selects chat.
    #[serde(default)]
    pub prompt_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: StyleProfile,
    #[serde(default)]
    pub topic_details: Option<TopicDetails>,
    #[serde(default)]
    pub brief: Option<String>,
}

/// Structured topic fields sent with outline requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicDetails {
    pub topic: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl TopicDetails {
    pub fn topic_name(&self) -> &str {
        non_blank(self.topic.as_deref()).unwrap_or(UNKNOWN_TOPIC)
    }

    fn is_empty(&self) -> bool {
        non_blank(self.topic.as_deref()).is_none()
            && non_blank(self.label.as_deref()).is_none()
            && non_blank(self.description.as_deref()).is_none()
            && self.keywords.as_ref().map_or(true, |k| k.is_empty())
    }

    /// Flattens the fields into one descriptive block, one labeled line each.
    pub fn flatten(&self) -> String {
        let keywords = self
            .keywords
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Topic: {}\nCategory: {}\nDescription: {}\nKeywords: {}",
            self.topic_name(),
            non_blank(self.label.as_deref()).unwrap_or(GENERAL_CATEGORY),
            self.description.as_deref().unwrap_or_default().trim(),
            keywords,
        )
    }
}

impl WritingRequest {
    /// The `promptType`, with blank treated as absent.
    pub fn prompt_type(&self) -> Option<&str> {
        non_blank(self.prompt_type.as_deref())
    }

    pub fn topic_name(&self) -> &str {
        self.topic_details
            .as_ref()
            .map_or(UNKNOWN_TOPIC, TopicDetails::topic_name)
    }

    fn brief(&self) -> Option<&str> {
        non_blank(self.brief.as_deref())
    }

    /// Auxiliary context for outline: flattened topic details (defaults when
    /// absent) followed by the brief, if any.
    pub fn outline_context(&self) -> String {
        let mut context = self
            .topic_details
            .clone()
            .unwrap_or_default()
            .flatten();
        if let Some(brief) = self.brief() {
            context.push_str(&format!("\nBrief: {brief}"));
        }
        context
    }

    /// Background context for chat. Each source appears on its own labeled
    /// line, and only when it has content.
    pub fn chat_context(&self) -> String {
        let mut lines = Vec::new();
        if let Some(draft) = non_blank(Some(self.draft_content.as_str())) {
            lines.push(format!("Draft content: {draft}"));
        }
        if let Some(topic) = self.topic_details.as_ref().filter(|t| !t.is_empty()) {
            lines.push(format!("Topic details: {}", topic.flatten().replace('\n', "; ")));
        }
        if let Some(brief) = self.brief() {
            lines.push(format!("Brief: {brief}"));
        }
        lines.join("\n")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
