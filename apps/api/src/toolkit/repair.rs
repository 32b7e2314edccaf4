//! Repair pass for outline HTML.
//!
//! Models often wrap the requested HTML in chatty preamble ("Here's your
//! outline!") or trailing remarks. These helpers cut the reply down to its
//! markup and guarantee something renderable comes back.

use once_cell::sync::Lazy;
use regex::Regex;

static TOP_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h2\b[^>]*>(.*?)</h2\s*>").expect("valid heading regex"));
static STRUCTURE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(?:h[1-6]|p)\b[^>]*>").expect("valid open-tag regex"));
static PARAGRAPH_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</p\s*>").expect("valid close-tag regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Text of every top-level (`<h2>`) heading, in document order.
/// Inner markup is stripped and whitespace collapsed; empty headings are skipped.
pub fn extract_main_sections(html: &str) -> Vec<String> {
    TOP_HEADING
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|inner| {
            let text = ANY_TAG.replace_all(inner.as_str(), "");
            WHITESPACE.replace_all(text.trim(), " ").into_owned()
        })
        .filter(|text| !text.is_empty())
        .collect()
}

/// Cuts `html` to the span from the first heading/paragraph open tag through
/// the last `</p>`. Returns `None` when there is no structural markup at all.
/// With no `</p>` after the first open tag, everything to the end is kept,
/// including any trailing remarks.
pub fn trim_to_markup(html: &str) -> Option<&str> {
    let start = STRUCTURE_OPEN.find(html)?.start();
    let body = &html[start..];
    let end = PARAGRAPH_CLOSE
        .find_iter(body)
        .last()
        .map(|m| m.end())
        .unwrap_or(body.len());
    Some(body[..end].trim())
}

/// Wraps markup-free text in a minimal heading + paragraph.
pub fn wrap_plain_outline(topic: &str, text: &str) -> String {
    format!("<h2>Outline for {topic}</h2>\n<p>{}</p>", text.trim())
}

/// Full repair: trim to markup, or wrap when the reply has none.
pub fn repair_outline_html(topic: &str, reply: &str) -> String {
    match trim_to_markup(reply) {
        Some(markup) => markup.to_string(),
        None => wrap_plain_outline(topic, reply),
    }
}

/// True if `html` contains at least one heading or paragraph open tag.
pub fn has_structure(html: &str) -> bool {
    STRUCTURE_OPEN.is_match(html)
}
