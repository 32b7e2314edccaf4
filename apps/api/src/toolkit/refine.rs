//! refine — rewrite draft content in the user's style, request first.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::llm_client::parse_json_reply;
use crate::models::profile::StyleProfile;
use crate::toolkit::prompts::build_refine_prompt;
use crate::toolkit::style::build_style_guidance;
use crate::toolkit::PromptToolkit;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefineResult {
    pub html_content: String,
    pub original_text: String,
    pub style_changes: Vec<String>,
}

/// Optional structured reply shape. Anything else is treated as raw HTML.
#[derive(Debug, Deserialize)]
struct RefineReply {
    refined_content: String,
    original_text: Option<String>,
    #[serde(default)]
    style_changes: Vec<String>,
}

impl PromptToolkit {
    /// Rewrites `content` to satisfy `instruction` in the profile's style.
    /// Never fails: a backend error is embedded in `html_content`.
    pub async fn refine(
        &self,
        content: &str,
        profile: &StyleProfile,
        instruction: &str,
    ) -> RefineResult {
        let prompt = build_refine_prompt(&build_style_guidance(profile), instruction, content);

        info!("Sending refine request for persona: {}", profile.persona);
        match self.backend.predict(&prompt).await {
            Ok(reply) => {
                info!("Refined content generated");
                parse_refine_reply(&reply, content)
            }
            Err(e) => {
                error!("Refine tool failed: {e}");
                RefineResult {
                    html_content: format!("<p>Error occurred: {e}</p>"),
                    original_text: content.to_string(),
                    style_changes: Vec::new(),
                }
            }
        }
    }
}

/// Structured parse first; otherwise the whole reply is the refined HTML.
fn parse_refine_reply(reply: &str, content: &str) -> RefineResult {
    match parse_json_reply::<RefineReply>(reply) {
        Ok(parsed) if !parsed.refined_content.trim().is_empty() => RefineResult {
            html_content: parsed.refined_content.trim().to_string(),
            original_text: parsed.original_text.unwrap_or_else(|| content.to_string()),
            style_changes: parsed.style_changes,
        },
        _ => RefineResult {
            html_content: strip_html_fence(reply).to_string(),
            original_text: content.to_string(),
            style_changes: Vec::new(),
        },
    }
}

/// Strips a ```html ... ``` wrapper if the model added one.
fn strip_html_fence(text: &str) -> &str {
    let text = text.trim();
    match text
        .strip_prefix("```html")
        .or_else(|| text.strip_prefix("```"))
    {
        Some(inner) => inner.trim_end().strip_suffix("```").unwrap_or(inner).trim(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::testing::RecordingBackend;

    const DRAFT: &str = "AI is changing healthcare in many important ways.";

    #[tokio::test]
    async fn test_raw_html_reply_is_final_content() {
        let backend = RecordingBackend::replying("<p>AI is <strong>rewiring</strong> healthcare.</p>\n");
        let toolkit = PromptToolkit::new(backend.clone());

        let result = toolkit
            .refine(DRAFT, &StyleProfile::default(), "Make it punchier")
            .await;

        assert_eq!(result.html_content, "<p>AI is <strong>rewiring</strong> healthcare.</p>");
        assert_eq!(result.original_text, DRAFT);
        assert!(result.style_changes.is_empty());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_json_reply_is_parsed() {
        let backend = RecordingBackend::replying(
            r#"```json
{"refined_content": "<p>Healthcare, rebooted.</p>", "style_changes": ["shorter opener"]}
```"#,
        );
        let toolkit = PromptToolkit::new(backend);

        let result = toolkit.refine(DRAFT, &StyleProfile::default(), "").await;

        assert_eq!(result.html_content, "<p>Healthcare, rebooted.</p>");
        assert_eq!(result.original_text, DRAFT);
        assert_eq!(result.style_changes, vec!["shorter opener".to_string()]);
    }

    #[tokio::test]
    async fn test_backend_failure_is_embedded_not_raised() {
        let backend = RecordingBackend::failing("model overloaded");
        let toolkit = PromptToolkit::new(backend);

        let result = toolkit.refine(DRAFT, &StyleProfile::default(), "Shorten").await;

        assert!(!result.html_content.is_empty());
        assert!(result.html_content.starts_with("<p>Error occurred: "));
        assert!(result.html_content.contains("model overloaded"));
        assert_eq!(result.original_text, DRAFT);
    }

    #[tokio::test]
    async fn test_prompt_carries_request_style_and_content() {
        let backend = RecordingBackend::replying("<p>ok</p>");
        let toolkit = PromptToolkit::new(backend.clone());
        let profile = StyleProfile {
            persona: "Tech Blogger".to_string(),
            ..StyleProfile::default()
        };

        toolkit.refine(DRAFT, &profile, "Make it engaging for teens").await;

        let prompt = backend.last_prompt();
        assert!(prompt.contains("Make it engaging for teens"));
        assert!(prompt.contains("Writing Persona: Tech Blogger"));
        assert!(prompt.contains(DRAFT));
    }

    #[test]
    fn test_html_fence_is_stripped() {
        assert_eq!(strip_html_fence("```html\n<p>x</p>\n```"), "<p>x</p>");
        assert_eq!(strip_html_fence("<p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_json_with_empty_content_falls_back_to_raw() {
        let reply = r#"{"refined_content": "  "}"#;
        let result = parse_refine_reply(reply, DRAFT);
        assert_eq!(result.html_content, reply);
    }
}
