//! chat — free-form reply in the user's voice. No structured output, no repair.

use serde::Serialize;
use tracing::{error, info};

use crate::models::profile::StyleProfile;
use crate::toolkit::prompts::build_chat_prompt;
use crate::toolkit::style::build_style_guidance;
use crate::toolkit::PromptToolkit;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResult {
    pub response: String,
    pub query: String,
    pub style_used: String,
}

impl PromptToolkit {
    /// Answers `query`; `context` is background only and may be empty.
    pub async fn chat(&self, query: &str, profile: &StyleProfile, context: &str) -> ChatResult {
        let prompt = build_chat_prompt(&build_style_guidance(profile), context, query);

        info!("Sending chat request for persona: {}", profile.persona);
        let response = match self.backend.predict(&prompt).await {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                error!("Chat completion failed: {e}");
                format!("I'm sorry, I encountered an error: {e}")
            }
        };

        ChatResult {
            response,
            query: query.to_string(),
            style_used: format!("{} ({})", profile.persona, profile.tone),
        }
    }
}
