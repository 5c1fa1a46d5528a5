//! Stateless text helpers used by the line scanner.

/// Default opening delimiter for [`tag_nest_level`].
pub const DEFAULT_OPEN: &str = "<";
/// Default closing delimiter for [`tag_nest_level`].
pub const DEFAULT_CLOSE: &str = ">";

/// Remove every span enclosed by `grouper`, along with the groupers.
///
/// Splitting on `grouper` yields alternating kept and dropped pieces,
/// starting with a kept one. An unterminated group drops everything after
/// its opening grouper.
pub fn remove_grouped_text(text: &str, grouper: &str) -> String {
    if grouper.is_empty() {
        return text.to_string();
    }
    text.split(grouper).step_by(2).collect()
}

/// Get the selector token at the start of a line.
///
/// The line is trimmed first; the selector ends at the first space or tab.
pub fn selector_from_line(line: &str) -> &str {
    let line = line.trim();
    match line.find(is_inline_whitespace) {
        Some(end) => &line[..end],
        None => line,
    }
}

/// Net nesting depth of `<` and `>` in `text`.
pub fn tag_nest_level(text: &str) -> i32 {
    tag_nest_level_with(text, DEFAULT_OPEN, DEFAULT_CLOSE)
}

/// Net nesting depth of `text` for an arbitrary delimiter pair.
///
/// Each occurrence of `open` adds one and each occurrence of `close`
/// subtracts one, scanning left to right without overlap. The result is
/// negative when closers outnumber openers.
pub fn tag_nest_level_with(text: &str, open: &str, close: &str) -> i32 {
    let mut rest = text;
    let mut level = 0;

    loop {
        let next = match (find_delimiter(rest, open), find_delimiter(rest, close)) {
            (None, None) => break,
            (Some(o), Some(c)) if c < o => (c + close.len(), -1),
            (Some(o), _) => (o + open.len(), 1),
            (None, Some(c)) => (c + close.len(), -1),
        };
        level += next.1;
        rest = &rest[next.0..];
    }

    level
}

/// Get the run of spaces and tabs at the start of `text`.
pub fn leading_whitespace(text: &str) -> &str {
    let end = text
        .find(|c: char| !is_inline_whitespace(c))
        .unwrap_or(text.len());
    &text[..end]
}

/// Spaces and tabs; line breaks are not inline whitespace.
pub(crate) fn is_inline_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn find_delimiter(text: &str, delimiter: &str) -> Option<usize> {
    if delimiter.is_empty() {
        None
    } else {
        text.find(delimiter)
    }
}
