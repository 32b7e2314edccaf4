//! Style guidance — the block every operation prepends to its prompt.

use crate::models::profile::StyleProfile;

pub const NO_STYLE_TRAITS: &str = "No specific style traits provided.";

/// Renders a profile into the instructional block shared by all operations.
/// Pure: the same profile always yields the same text.
pub fn build_style_guidance(profile: &StyleProfile) -> String {
    format!(
        "Writing Persona: {persona}\n\
         Tone: {tone}\n\
         Style Traits:\n\
         {traits}\n\
         \n\
         Sample Text in This Style:\n\
         {sample}",
        persona = profile.persona,
        tone = profile.tone,
        traits = format_style_traits(&profile.style_traits),
        sample = profile.sample_text,
    )
}

fn format_style_traits(traits: &[String]) -> String {
    if traits.is_empty() {
        return NO_STYLE_TRAITS.to_string();
    }
    traits
        .iter()
        .map(|t| format!("- {t}"))
        .collect::<Vec<_>>()
        .join("\n")
}
