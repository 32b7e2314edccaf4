//! outline — structural HTML outline (headings + guidance), never prose.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::models::profile::StyleProfile;
use crate::toolkit::prompts::build_outline_prompt;
use crate::toolkit::repair::{extract_main_sections, has_structure, repair_outline_html};
use crate::toolkit::style::build_style_guidance;
use crate::toolkit::PromptToolkit;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineResult {
    pub html_content: String,
    pub main_sections: Vec<String>,
    /// Always `main_sections.len()`.
    pub section_count: usize,
}

impl OutlineResult {
    /// Sections come from the raw reply, before any trimming or wrapping.
    fn from_reply(topic: &str, reply: &str) -> Self {
        let main_sections = extract_main_sections(reply);
        let html_content = repair_outline_html(topic, reply);
        Self {
            section_count: main_sections.len(),
            main_sections,
            html_content,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            html_content: format!("<p>Error occurred: {message}</p>"),
            main_sections: Vec::new(),
            section_count: 0,
        }
    }
}

impl PromptToolkit {
    /// Generates an outline for `topic`. `brief` carries the flattened topic
    /// details; `request` is the user's own instruction.
    pub async fn outline(
        &self,
        topic: &str,
        profile: &StyleProfile,
        brief: &str,
        request: &str,
    ) -> OutlineResult {
        let prompt = build_outline_prompt(&build_style_guidance(profile), request, brief);

        info!("Sending outline request for topic: {topic}");
        let reply = match self.backend.predict(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Outline tool failed: {e}");
                return OutlineResult::failed(&e.to_string());
            }
        };

        if !has_structure(&reply) {
            warn!("Outline reply had no heading or paragraph markup, wrapping as plain text");
        }
        let result = OutlineResult::from_reply(topic, &reply);
        info!("Outline generated with {} sections", result.section_count);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::testing::RecordingBackend;

    const MODEL_OUTLINE: &str = "Here is your outline:\n\
        <h2>1. Opening Hook</h2>\n<p><em>Start with: rooftop solar adoption numbers</em></p>\n\
        <h2>2. Solar vs Wind</h2>\n<h3>Key Point A: Cost</h3>\n<p><em>Focus on: levelised cost</em></p>\n\
        <h2>3. Conclusion</h2>\n<p><em>Wrap up with: what readers can do</em></p>\n\
        Hope this helps!";

    #[tokio::test]
    async fn test_outline_extracts_sections_and_trims_chatter() {
        let backend = RecordingBackend::replying(MODEL_OUTLINE);
        let toolkit = PromptToolkit::new(backend.clone());

        let result = toolkit
            .outline(
                "Renewable Energy",
                &StyleProfile::default(),
                "Topic: Renewable Energy\nKeywords: solar, wind",
                "Outline a blog post",
            )
            .await;

        assert_eq!(
            result.main_sections,
            vec!["1. Opening Hook", "2. Solar vs Wind", "3. Conclusion"]
        );
        assert_eq!(result.section_count, result.main_sections.len());
        assert!(result.html_content.starts_with("<h2>"));
        assert!(result.html_content.ends_with("</p>"));
        assert!(!result.html_content.contains("Hope this helps"));

        let prompt = backend.last_prompt();
        assert!(prompt.contains("Keywords: solar, wind"));
        assert!(prompt.contains("Outline a blog post"));
    }

    #[tokio::test]
    async fn test_plain_text_reply_is_wrapped() {
        let backend = RecordingBackend::replying("1. Intro\n2. Solar\n3. Wind");
        let toolkit = PromptToolkit::new(backend);

        let result = toolkit
            .outline("Renewable Energy", &StyleProfile::default(), "", "")
            .await;

        assert!(result.html_content.contains("<h2>Outline for Renewable Energy</h2>"));
        assert!(result.html_content.contains("<p>1. Intro\n2. Solar\n3. Wind</p>"));
        assert!(has_structure(&result.html_content));
        assert!(result.main_sections.is_empty());
        assert_eq!(result.section_count, 0);
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_error_paragraph() {
        let backend = RecordingBackend::failing("throttled");
        let toolkit = PromptToolkit::new(backend);

        let result = toolkit
            .outline("Anything", &StyleProfile::default(), "", "")
            .await;

        assert!(result.html_content.starts_with("<p>Error occurred: "));
        assert!(result.html_content.contains("throttled"));
        assert!(result.main_sections.is_empty());
        assert_eq!(result.section_count, 0);
    }

    #[tokio::test]
    async fn test_paragraph_only_reply_has_zero_sections() {
        let backend = RecordingBackend::replying("<p>Just one idea.</p>");
        let toolkit = PromptToolkit::new(backend);

        let result = toolkit
            .outline("Topic", &StyleProfile::default(), "", "")
            .await;

        assert_eq!(result.html_content, "<p>Just one idea.</p>");
        assert_eq!(result.section_count, 0);
        assert!(result.main_sections.is_empty());
    }

    #[tokio::test]
    async fn test_sections_after_last_paragraph_still_count() {
        let backend = RecordingBackend::replying(
            "<h2>1. Intro</h2><p>Set the scene</p>\
             <h2>2. Body</h2><ul><li>Evidence</li></ul>\
             <h2>3. Wrap</h2><ul><li>Call to action</li></ul>",
        );
        let toolkit = PromptToolkit::new(backend);

        let result = toolkit
            .outline("Essay", &StyleProfile::default(), "", "")
            .await;

        assert_eq!(result.main_sections, vec!["1. Intro", "2. Body", "3. Wrap"]);
        assert_eq!(result.section_count, 3);
        assert_eq!(result.html_content, "<h2>1. Intro</h2><p>Set the scene</p>");
    }
}
