//! Tag/id/class shorthand parsing.

use smol_str::SmolStr;

/// Tag used when a selector names no tag.
pub const DEFAULT_TAG: &str = "div";

/// A parsed `tag#id.class` selector.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selector {
    /// The tag name. Never empty.
    pub tag: SmolStr,
    /// The id, if any `#fragment` was present.
    pub id: Option<String>,
    /// Classes in source order, duplicates kept.
    pub classes: Vec<String>,
}

impl Selector {
    /// A bare selector for `tag`, with no id or classes.
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
        }
    }
}

/// Parse a selector token into tag, id and classes.
///
/// Fragments are accepted verbatim. When several `#` fragments appear the
/// last one is kept.
pub fn parse_selector(selector: &str) -> Selector {
    let (tag, mut rest) = match selector.find(is_fragment_marker) {
        Some(idx) => selector.split_at(idx),
        None => (selector, ""),
    };

    let mut parsed = Selector::new(if tag.is_empty() { DEFAULT_TAG } else { tag });

    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let end = body.find(is_fragment_marker).unwrap_or(body.len());
        let (fragment, tail) = body.split_at(end);

        if marker == '#' {
            parsed.id = Some(fragment.to_string());
        } else {
            parsed.classes.push(fragment.to_string());
        }
        rest = tail;
    }

    parsed
}

fn is_fragment_marker(c: char) -> bool {
    c == '#' || c == '.'
}
