//! proofread — objective error corrections that leave the user's style alone.
//!
//! The prompt asks the backend never to return identical pairs or corrections
//! for text that isn't there. Identical pairs are still filtered here; absent
//! originals are tolerated and simply skipped when deriving `improved_text`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::llm_client::parse_json_reply;
use crate::models::profile::StyleProfile;
use crate::toolkit::prompts::build_proofread_prompt;
use crate::toolkit::style::build_style_guidance;
use crate::toolkit::PromptToolkit;

/// A single fix. Invariant: `original != corrected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub original: String,
    pub corrected: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProofreadResult {
    pub original_text: String,
    pub corrections: Vec<Correction>,
    pub improved_text: String,
    pub error_count: usize,
}

/// Reply fields, read leniently: a malformed correction entry is skipped
/// rather than failing the whole reply, and a null list counts as empty.
#[derive(Debug, Deserialize)]
struct ProofreadReply {
    #[serde(default)]
    original_text: Value,
    #[serde(default)]
    corrections: Value,
    #[serde(default)]
    improved_text: Value,
}

impl ProofreadReply {
    fn corrections(&self) -> (Vec<Correction>, usize) {
        let entries = self.corrections.as_array().map(Vec::as_slice).unwrap_or_default();
        let parsed: Vec<Correction> = entries
            .iter()
            .filter_map(|entry| Correction::deserialize(entry).ok())
            .collect();
        let malformed = entries.len() - parsed.len();
        (parsed, malformed)
    }
}

impl PromptToolkit {
    /// Proofreads `content`. `instructions` are the user's optional criteria
    /// ("only fix words starting with T"); empty means the default rules.
    pub async fn proofread(
        &self,
        content: &str,
        profile: &StyleProfile,
        instructions: &str,
    ) -> ProofreadResult {
        let prompt = build_proofread_prompt(&build_style_guidance(profile), instructions, content);

        info!("Sending proofread request for persona: {}", profile.persona);
        match self.backend.predict(&prompt).await {
            Ok(reply) => parse_proofread_reply(&reply, content),
            Err(e) => {
                error!("Proofread tool failed: {e}");
                ProofreadResult {
                    original_text: content.to_string(),
                    corrections: Vec::new(),
                    improved_text: content.to_string(),
                    error_count: 0,
                }
            }
        }
    }
}

fn parse_proofread_reply(reply: &str, content: &str) -> ProofreadResult {
    let parsed = parse_json_reply::<Value>(reply)
        .ok()
        .filter(Value::is_object)
        .and_then(|value| serde_json::from_value::<ProofreadReply>(value).ok());

    let Some(parsed) = parsed else {
        warn!("Proofread reply was not a JSON object, returning it as improved text");
        return ProofreadResult {
            original_text: content.to_string(),
            corrections: Vec::new(),
            improved_text: reply.to_string(),
            error_count: 0,
        };
    };

    let (received, malformed) = parsed.corrections();
    if malformed > 0 {
        warn!("Skipped {malformed} malformed corrections in proofread reply");
    }
    let received_count = received.len();
    let corrections = retain_real_corrections(received);
    if corrections.len() < received_count {
        warn!(
            "Dropped {} no-op corrections from proofread reply",
            received_count - corrections.len()
        );
    }

    let original_text = parsed
        .original_text
        .as_str()
        .filter(|t| !t.is_empty())
        .unwrap_or(content)
        .to_string();
    let improved_text = match parsed.improved_text.as_str() {
        Some(text) => text.to_string(),
        None => apply_corrections(&original_text, &corrections),
    };

    info!("Proofread found {} errors", corrections.len());
    ProofreadResult {
        original_text,
        error_count: corrections.len(),
        corrections,
        improved_text,
    }
}

/// Drops pairs whose original is empty or equal to the correction.
fn retain_real_corrections(corrections: Vec<Correction>) -> Vec<Correction> {
    corrections
        .into_iter()
        .filter(|c| !c.original.trim().is_empty() && c.original.trim() != c.corrected.trim())
        .collect()
}

/// Applies each correction to its first occurrence, in order.
/// Corrections whose original text is absent are skipped.
fn apply_corrections(text: &str, corrections: &[Correction]) -> String {
    corrections.iter().fold(text.to_string(), |acc, c| {
        if acc.contains(&c.original) {
            acc.replacen(&c.original, &c.corrected, 1)
        } else {
            acc
        }
    })
}
