// All LLM prompt templates for the prompt toolkit.
// Each operation fills exactly one template; builders below do the substitution
// so templates stay reviewable independently of control flow.
// Slots are filled in one pass: inserted text is never scanned for further slots.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, USER_PRIORITY_INSTRUCTION};

static SLOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("valid slot regex"));

/// Stand-in for an empty user request so the prompt never has a blank priority slot.
const NO_SPECIFIC_REQUEST: &str = "(No specific request. Refine for clarity and style.)";
const NO_PROOFREAD_CRITERIA: &str = "(No special instructions. Apply the default error rules below.)";
const NO_CHAT_CONTEXT: &str = "(none)";

// ────────────────────────────────────────────────────────────────────────────
// refine
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {user_priority}, {style_guidance}, {request}, {content}
pub const REFINE_PROMPT_TEMPLATE: &str = r#"You are a writing assistant that refines content according to specific style profiles.

PRIMARY USER REQUEST (HIGHEST PRIORITY):
{request}

USER PROFILE:
{style_guidance}

CONTENT TO REFINE:
{content}

{user_priority}

Rewrite this content to fulfill the user's specific request while matching their writing style.
PRIORITIZE the user's request over everything else, including style consistency if there is a conflict.

REQUIREMENTS (in priority order):
1. FIRST AND FOREMOST: Follow the user's specific request exactly
2. Preserve the original meaning and key information (unless the user requests otherwise)
3. Apply the user's writing style and tone where possible
4. If the original content has HTML formatting, preserve and enhance it
5. If the original content is plain text, return well-formatted HTML

OUTPUT FORMAT:
Return ONLY the refined HTML content, with no wrapper text or explanations.
If you want to report what you changed, return this JSON object instead:
{"refined_content": "<p>refined HTML</p>", "original_text": "the text you were given", "style_changes": ["short description of one change"]}"#;

// ────────────────────────────────────────────────────────────────────────────
// outline
// ────────────────────────────────────────────────────────────────────────────

/// Formatting exemplar embedded in the outline prompt.
pub const OUTLINE_HTML_EXAMPLE: &str = r#"<h2>1. Opening Hook</h2>
<p><em>Start with: A compelling statistic, question, or scenario related to [TOPIC]</em></p>

<h2>2. Introduction &amp; Context</h2>
<p><em>Brief overview: Define the topic and explain why it matters to your audience</em></p>

<h2>3. Main Content Structure</h2>
<h3>Key Point A: [Primary Aspect]</h3>
<p><em>Focus on: Core concepts, supporting evidence, real-world examples</em></p>

<h3>Key Point B: [Secondary Aspect]</h3>
<p><em>Include: How it connects to Point A, practical applications</em></p>

<h3>Key Point C: [Final Aspect]</h3>
<p><em>Emphasize: Future implications, actionable insights</em></p>

<h2>4. Conclusion &amp; Call-to-Action</h2>
<p><em>Wrap up with: Key takeaways summary, next steps for readers</em></p>"#;

/// Replace: {user_priority}, {html_example}, {style_guidance}, {request}, {topic_details}
pub const OUTLINE_PROMPT_TEMPLATE: &str = r#"You are a writing coach creating a CONCISE STRUCTURAL OUTLINE, not a full article.

PRIMARY USER REQUEST (HIGHEST PRIORITY):
{request}

USER PROFILE:
{style_guidance}

TOPIC INFORMATION:
{topic_details}

{user_priority}

Create a brief structural outline that guides the user on HOW to write about this topic.

OUTLINE REQUIREMENTS (in priority order):
1. FIRST AND FOREMOST: Follow the user's specific request exactly
2. Provide STRUCTURE and GUIDANCE, not full content
3. Use brief instructional phrases like "Focus on...", "Include...", "Emphasize..."
4. Give writing direction rather than complete sentences
5. Keep sections concise - this is a roadmap, not the destination
6. Adapt the structure to fit the specific topic provided
7. Include writing tips specific to the user's style

FORMAT REQUIREMENTS:
Return your outline as HTML following this structure:

{html_example}

IMPORTANT:
- Replace [TOPIC] and [Aspects] with actual topic elements
- Use <h2> for top-level sections and <h3> for sub-points
- Provide 3-5 top-level sections
- Keep guidance brief and actionable, in italics
- Focus on WHAT to write about, not writing the content itself

Return ONLY clean HTML. No preamble, no closing remarks."#;

// ────────────────────────────────────────────────────────────────────────────
// proofread
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {json_only}, {style_guidance}, {instructions}, {content}
pub const PROOFREAD_PROMPT_TEMPLATE: &str = r#"You are a meticulous proofreader that identifies objective errors in text.

USER INSTRUCTIONS (HIGHEST PRIORITY):
{instructions}

USER PROFILE:
{style_guidance}

CONTENT TO PROOFREAD:
{content}

When the user mentions specific letters (like "T and G"), apply them case-insensitively.
If the user gives specific criteria (like "only fix words starting with X"), IGNORE ALL OTHER ERRORS.

WHAT COUNTS AS AN ERROR:
- Spelling mistakes
- Grammar errors
- Punctuation errors
- Typos

WHAT IS NOT AN ERROR (never flag these):
- Stylistic differences or word-choice preferences
- Contractions, colloquialisms, or informal language that match the user's style
- Anything you are unsure about. Be conservative.

CRITICAL RULE: NEVER return a correction where "original" and "corrected" are identical.
CRITICAL RULE: ONLY suggest corrections for text that actually appears in the content above. Do not invent errors.

Examples of CORRECT corrections:
- "teh" -> "the" (typo)
- "recieve" -> "receive" (spelling)
- "Your correct" -> "You're correct" (grammar)

Examples of WRONG corrections (DO NOT DO THESE):
- "challenges" -> "challenges" (identical text)
- "gonna" -> "going to" (informal but matches the style)

VALIDATION CHECK: Before adding any correction, verify:
1. "original" != "corrected"
2. The correction meets the user's specific criteria (if any)
3. The original text appears verbatim in the content

Return a JSON object with these fields:
- "corrections": list of objects with "original" and "corrected"
- "improved_text": the full content with every correction applied

Example:
{"corrections": [{"original": "teh", "corrected": "the"}], "improved_text": "..."}

If there are no genuine errors, return: {"corrections": [], "improved_text": "<the content unchanged>"}

{json_only}"#;

// ────────────────────────────────────────────────────────────────────────────
// chat
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {style_guidance}, {context}, {query}
pub const CHAT_PROMPT_TEMPLATE: &str = r#"You are a helpful writing assistant having a natural conversation with a user.

USER'S PREFERRED WRITING STYLE:
{style_guidance}

BACKGROUND CONTEXT:
{context}

USER QUERY:
{query}

CRITICAL: Match the user's energy and length. Short query = short response.

RESPONSE RULES:
1. For greetings ("hi", "hello"): respond with 1 brief, warm sentence only
2. For simple questions: give direct answers without elaboration
3. Match their conversational tone and writing style naturally
4. Use their persona, tone, and style traits
5. Never mention that you are adapting to their style
6. The background context is for reference only; bring it up only if they ask about it
7. Be conversational, not formal or essay-like
8. KEEP RESPONSES SHORT: no multi-paragraph responses for simple interactions

This is casual chat, not content creation. Be brief and natural."#;

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

pub fn build_refine_prompt(style_guidance: &str, request: &str, content: &str) -> String {
    fill(
        REFINE_PROMPT_TEMPLATE,
        &[
            ("user_priority", USER_PRIORITY_INSTRUCTION),
            ("style_guidance", style_guidance),
            ("request", or_placeholder(request, NO_SPECIFIC_REQUEST)),
            ("content", content),
        ],
    )
}

pub fn build_outline_prompt(style_guidance: &str, request: &str, topic_details: &str) -> String {
    fill(
        OUTLINE_PROMPT_TEMPLATE,
        &[
            ("user_priority", USER_PRIORITY_INSTRUCTION),
            ("html_example", OUTLINE_HTML_EXAMPLE),
            ("style_guidance", style_guidance),
            ("request", or_placeholder(request, NO_SPECIFIC_REQUEST)),
            ("topic_details", topic_details),
        ],
    )
}

pub fn build_proofread_prompt(style_guidance: &str, instructions: &str, content: &str) -> String {
    fill(
        PROOFREAD_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("style_guidance", style_guidance),
            ("instructions", or_placeholder(instructions, NO_PROOFREAD_CRITERIA)),
            ("content", content),
        ],
    )
}

pub fn build_chat_prompt(style_guidance: &str, context: &str, query: &str) -> String {
    fill(
        CHAT_PROMPT_TEMPLATE,
        &[
            ("style_guidance", style_guidance),
            ("context", or_placeholder(context, NO_CHAT_CONTEXT)),
            ("query", query),
        ],
    )
}

/// Substitutes `{name}` slots in a single scan of `template`.
/// Unknown slot names are left untouched.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    SLOT.replace_all(template, |caps: &Captures| {
        let name = &caps[1];
        values
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refine_prompt_ranks_request_above_style() {
        let prompt = build_refine_prompt("Tone: Casual", "Make it punchier", "AI is changing healthcare.");
        let request_at = prompt.find("Make it punchier").unwrap();
        let style_at = prompt.find("Tone: Casual").unwrap();
        assert!(request_at < style_at);
        assert!(prompt.contains("PRIORITIZE the user's request over everything else"));
        assert!(prompt.contains(USER_PRIORITY_INSTRUCTION));
        assert!(prompt.contains("AI is changing healthcare."));
    }

    #[test]
    fn test_blank_request_gets_placeholder() {
        let prompt = build_refine_prompt("guidance", "  ", "text");
        assert!(prompt.contains(NO_SPECIFIC_REQUEST));
    }

    #[test]
    fn test_outline_prompt_embeds_template() {
        let prompt = build_outline_prompt("guidance", "Outline my post", "Topic: Rust");
        assert!(prompt.contains("<h2>1. Opening Hook</h2>"));
        assert!(prompt.contains("Provide 3-5 top-level sections"));
        assert!(prompt.contains("Topic: Rust"));
        assert!(!prompt.contains("{html_example}"));
    }

    #[test]
    fn test_proofread_prompt_forbids_identical_pairs() {
        let prompt = build_proofread_prompt("guidance", "", "Teh cat.");
        assert!(prompt.contains("NEVER return a correction where \"original\" and \"corrected\" are identical"));
        assert!(prompt.contains("ONLY suggest corrections for text that actually appears"));
        assert!(prompt.contains(NO_PROOFREAD_CRITERIA));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_chat_prompt_without_context_uses_none_marker() {
        let prompt = build_chat_prompt("guidance", "", "hi");
        assert!(prompt.contains("BACKGROUND CONTEXT:\n(none)\n"));
        assert!(prompt.contains("USER QUERY:\nhi\n"));
    }

    #[test]
    fn test_no_placeholders_survive() {
        let prompts = [
            build_refine_prompt("g", "r", "c"),
            build_outline_prompt("g", "r", "t"),
            build_proofread_prompt("g", "i", "c"),
            build_chat_prompt("g", "x", "q"),
        ];
        for prompt in prompts {
            for marker in ["{style_guidance}", "{request}", "{content}", "{user_priority}", "{json_only}", "{query}", "{context}"] {
                assert!(!prompt.contains(marker), "{marker} left in prompt");
            }
        }
    }

    #[test]
    fn test_inserted_text_is_not_rescanned_for_slots() {
        let guidance = "Sample Text in This Style:\nTemplate vars look like {content} and {request}.";
        let prompt = build_refine_prompt(guidance, "Shorten it to {query}", "SECRET DRAFT");

        assert!(prompt.contains(guidance));
        assert!(prompt.contains("Shorten it to {query}"));
        assert_eq!(prompt.matches("SECRET DRAFT").count(), 1);

        let chat = build_chat_prompt("guidance", "Draft content: uses {query}", "what is {context}?");
        assert!(chat.contains("Draft content: uses {query}"));
        assert!(chat.contains("what is {context}?"));
    }

    #[test]
    fn test_priority_instruction_follows_material() {
        let refine = build_refine_prompt("g", "r", "DRAFT BODY");
        assert!(refine.find("DRAFT BODY").unwrap() < refine.find(USER_PRIORITY_INSTRUCTION).unwrap());

        let outline = build_outline_prompt("g", "r", "Topic: Rust");
        assert!(outline.find("Topic: Rust").unwrap() < outline.find(USER_PRIORITY_INSTRUCTION).unwrap());

        assert!(!build_proofread_prompt("g", "i", "c").contains(USER_PRIORITY_INSTRUCTION));
        assert!(!build_chat_prompt("g", "x", "q").contains(USER_PRIORITY_INSTRUCTION));
    }
}
