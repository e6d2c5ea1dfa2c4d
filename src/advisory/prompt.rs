pub const SYSTEM: &str = "You are a security expert helping developers fix vulnerabilities. \
                          Provide clear, concise, and actionable advice.";

pub const DEFAULT_MAX_EXCERPT_CHARS: usize = 6000;

/// Builds the user message for one disclosure page.
pub fn build(excerpt: &str, max_excerpt_chars: usize) -> String {
    let excerpt = truncate(excerpt, max_excerpt_chars);

    format!(
        r#"Given the following CVE content, provide two concise sentences:
1. First sentence: List any version updates or fixes required (if none, state that).
2. Second sentence: Suggest any workarounds or mitigations (if none, state that).

CVE Content:
{excerpt}

Format the response as a JSON object with two fields:
{{
  "fixes": "First sentence about fixes",
  "workarounds": "Second sentence about workarounds"
}}"#
    )
}

/// Cuts `text` to at most `max_chars` characters, never inside a code point.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
