//! Rich text flattening: editor markup to positional plain text.
//!
//! Output uses `\n` for line and paragraph breaks and a literal `"• "` prefix
//! for list items. Emphasis and unknown tags are stripped; text content and
//! ordering are preserved.
//!
//! Tags and entities are only interpreted when the input contains at least
//! one editor tag (`MARKUP_TAG`); anything else is treated as plain text.
//! Flattened output never contains an editor tag, so flattening it a second
//! time only re-normalizes whitespace and is a no-op.

use std::sync::LazyLock;

use regex::Regex;

/// Prefix marking a list item line in flattened text.
pub const BULLET_MARKER: &str = "• ";

/// Tags the editor emits. Their presence switches flattening into markup mode.
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|br|ul|ol|li|strong|b|em|i|u|s|span|a|div|h[1-6])(?:\s[^>]*)?/?>")
        .expect("valid regex")
});
static TAG_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s*\n\s*<").expect("valid regex"));
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
static PARAGRAPH_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p\s*>").expect("valid regex"));
static LIST_CONTAINER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(?:ul|ol)(?:\s[^>]*)?>").expect("valid regex"));
static LIST_ITEM_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li(?:\s[^>]*)?>").expect("valid regex"));
static LIST_ITEM_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</li\s*>").expect("valid regex"));
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:([0-9]{1,7})|[xX]([0-9a-fA-F]{1,6}));").expect("valid regex"));
static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid regex"));

// Private sentinel used between tag rewriting and line assembly. It sits in
// the Unicode private-use area so user text cannot collide with it.
const ITEM_SENTINEL: char = '\u{E000}';

/// Flattens the supported rich-text subset into plain text.
pub fn flatten(markup: &str) -> String {
    let text = markup.replace("\r\n", "\n").replace('\r', "\n");
    let text = if MARKUP_TAG.is_match(&text) {
        strip_markup(&text)
    } else {
        text
    };

    let mut lines: Vec<String> = Vec::new();
    for raw in text.split('\n') {
        let normalized = INLINE_WHITESPACE.replace_all(raw, " ");
        let line = normalized.trim();

        let is_item = line.starts_with(ITEM_SENTINEL) || line.starts_with(BULLET_MARKER);
        if is_item {
            let content = line
                .strip_prefix(ITEM_SENTINEL)
                .or_else(|| line.strip_prefix(BULLET_MARKER))
                .unwrap_or(line)
                .trim();
            // Empty list items carry no content worth a bullet.
            if !content.is_empty() {
                lines.push(format!("{BULLET_MARKER}{content}"));
            }
            continue;
        }

        if line.is_empty() {
            if lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push(String::new());
            }
        } else {
            lines.push(line.to_string());
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Rewrites block tags into line structure, drops every other tag and
/// decodes entities. An editor tag spelled out with entities (`&lt;p&gt;`)
/// keeps its `<` escaped so the result never reads as markup again.
fn strip_markup(text: &str) -> String {
    // Source formatting between tags is not content.
    let text = TAG_GAP.replace_all(text, "><");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = PARAGRAPH_CLOSE.replace_all(&text, "\n");
    let text = LIST_CONTAINER.replace_all(&text, "\n\n");
    let item_open = format!("\n{ITEM_SENTINEL}");
    let text = LIST_ITEM_OPEN.replace_all(&text, item_open.as_str());
    let text = LIST_ITEM_CLOSE.replace_all(&text, "");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);
    MARKUP_TAG
        .replace_all(&text, |caps: &regex::Captures| caps[0].replacen('<', "&lt;", 1))
        .into_owned()
}

/// Decodes the handful of entities editors emit. Unknown entities are kept
/// verbatim.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let named = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");
    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(dec), _) => dec.as_str().parse::<u32>().ok(),
            (None, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    // `&amp;` last so that "&amp;lt;" becomes "&lt;" rather than "<".
    numeric.replace("&amp;", "&")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
