//! Logical line scanning.
//!
//! A logical line is one of:
//!
//! - a verbatim line, starting with the embedding token, copied to the
//!   output as-is;
//! - a chain of tags joined by [`CHAIN_SEPARATOR`], each nested inside the
//!   previous one;
//! - a single tag, optionally followed by inline content in angle brackets
//!   that may continue over the next physical lines.

use log::trace;
use wml_parser::{
    parse_attributes, parse_selector, selector_from_line, tag_nest_level, Attribute, Selector,
};

use crate::error::{CompileError, CompileResult};
use crate::state::CompilationState;

/// Separates several tags written on one line.
pub const CHAIN_SEPARATOR: &str = "\\-\\";

/// Everything parsed from one tag on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineParse {
    pub(crate) selector: Selector,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) body: TagBody,
}

/// How a tag ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagBody {
    /// Children follow on more deeply indented lines.
    Open,
    /// `<tag ... />`.
    SelfClosing,
    /// Text closed on the same output line.
    Inline(String),
}

impl<'a> CompilationState<'a> {
    /// Consume and emit the next logical line.
    pub(crate) fn process_next_line(&mut self) -> CompileResult<()> {
        let Some(raw) = self.next_physical_line() else {
            return Ok(());
        };
        let line = raw.trim();
        trace!("line {}: {:?}", self.line_number, line);

        if line.is_empty() {
            return Ok(());
        }

        if let Some(embedded) = line.strip_prefix(self.embedding_token) {
            self.emitter
                .write_verbatim(embedded, self.current_level, self.indent.unit());
            return Ok(());
        }

        let mut segments = split_chain(line);
        let last = segments.pop().unwrap_or(line);

        for segment in segments {
            let tag = self.parse_tag(segment, false)?;
            self.emitter
                .write_tag(&tag, self.current_level, self.indent.unit());
            self.previous_level = self.current_level;
            self.current_level += 1;
        }

        let tag = self.parse_tag(last, true)?;
        self.emitter
            .write_tag(&tag, self.current_level, self.indent.unit());
        Ok(())
    }

    /// Parse selector and attributes of one tag.
    ///
    /// Only the final tag of a line may carry inline content or close
    /// itself; for the others anything after the attributes is dropped.
    fn parse_tag(&mut self, segment: &str, is_last: bool) -> CompileResult<LineParse> {
        let segment = segment.trim();
        let selector_token = selector_from_line(segment);
        let selector = parse_selector(selector_token);
        let parsed = parse_attributes(segment[selector_token.len()..].trim(), self.line_number)?;

        let body = if is_last {
            self.tag_body(parsed.rest)?
        } else {
            TagBody::Open
        };

        Ok(LineParse {
            selector,
            attributes: parsed.attributes,
            body,
        })
    }

    /// Decide how a tag ends from what follows its attributes.
    fn tag_body(&mut self, rest: &str) -> CompileResult<TagBody> {
        if rest.starts_with('<') {
            return self.inline_content(rest).map(TagBody::Inline);
        }
        if rest.starts_with('/') && rest.ends_with('/') {
            return Ok(TagBody::SelfClosing);
        }
        Ok(TagBody::Open)
    }

    /// Collect bracketed inline content, folding in further physical lines
    /// until the brackets balance.
    fn inline_content(&mut self, first: &str) -> CompileResult<String> {
        let start_line = self.line_number;
        let mut depth = tag_nest_level(first);
        if depth < 0 {
            return Err(CompileError::unbalanced_closing_bracket(start_line));
        }

        let mut content = first.to_string();
        while depth > 0 {
            let next = self
                .next_physical_line()
                .ok_or_else(|| CompileError::unmatched_opening_bracket(start_line))?
                .trim();
            depth += tag_nest_level(next);
            content.push(' ');
            content.push_str(next);
        }

        Ok(strip_enclosing(&content))
    }
}

/// Split a line on [`CHAIN_SEPARATOR`], ignoring empty trailing pieces.
fn split_chain(line: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = line.split(CHAIN_SEPARATOR).collect();
    while segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}

/// Drop the outer brackets of balanced inline content.
fn strip_enclosing(content: &str) -> String {
    let mut chars = content.trim().chars();
    chars.next();
    chars.next_back();
    chars.as_str().trim().to_string()
}
