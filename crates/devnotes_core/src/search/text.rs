//! Markup stripping and query matching.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum characters kept by `preview_text`.
pub const PREVIEW_MAX_CHARS: usize = 100;

static BLOCK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:p|div|br|li|ul|ol|pre|blockquote|h[1-6]|tr|td|th)\b[^>]*>")
        .expect("valid block tag regex")
});
static ANY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(?:#(\d+)|#x([0-9a-fA-F]+)|([a-zA-Z]+));").expect("valid entity regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Derives readable text from editor markup.
///
/// Block-level tags become word breaks, other tags are dropped, common
/// entities are decoded and whitespace is collapsed.
pub fn plain_text(markup: &str) -> String {
    let spaced = BLOCK_TAG_RE.replace_all(markup, " ");
    let untagged = ANY_TAG_RE.replace_all(&spaced, "");
    let decoded = ENTITY_RE.replace_all(&untagged, |caps: &regex::Captures<'_>| {
        decode_entity(caps).unwrap_or_else(|| caps[0].to_string())
    });
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Plain text capped at `PREVIEW_MAX_CHARS`, with an ellipsis when cut.
pub fn preview_text(markup: &str) -> String {
    let text = plain_text(markup);
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        return text;
    }
    let mut cut: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
    cut.push('…');
    cut
}

/// Returns whether `title` or the plain text of `markup` contains `query`.
///
/// A query that is empty after trimming matches everything.
pub fn matches_query(title: &str, markup: &str, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&needle) || plain_text(markup).to_lowercase().contains(&needle)
}

fn decode_entity(caps: &regex::Captures<'_>) -> Option<String> {
    if let Some(dec) = caps.get(1) {
        return dec
            .as_str()
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    if let Some(hex) = caps.get(2) {
        return u32::from_str_radix(hex.as_str(), 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    let named = match caps.get(3)?.as_str() {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        _ => return None,
    };
    Some(named.to_string())
}
