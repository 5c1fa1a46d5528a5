//! Attribute list parsing.
//!
//! Attributes follow the selector as unquoted `name=value` pairs separated
//! by whitespace. Values may embed template placeholders (`{{ }}` or
//! `<% %>`), which are copied through verbatim and may contain spaces.
//! Parsing stops where inline content (`<...>`) begins.

use std::fmt;

use log::debug;

use crate::error::{ParseError, ParseResult};
use crate::text::is_inline_whitespace;

/// Template placeholder delimiters recognised at the start of a value.
pub const TEMPLATE_DELIMITERS: &[(&str, &str)] = &[("{{", "}}"), ("<%", "%>")];

/// A single `name="value"` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// The attribute name.
    pub name: String,
    /// The raw value, emitted without escaping.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Split a `name=value` chunk at its first `=`.
    fn from_chunk(chunk: &str) -> Option<Self> {
        let (name, value) = chunk.trim().split_once('=')?;
        Some(Self::new(name.trim(), value))
    }
}

impl fmt::Display for Attribute {
    /// Renders as ` name="value"`, including the leading space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}=\"{}\"", self.name, self.value)
    }
}

/// The attributes consumed from a line and what is left over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAttributes<'a> {
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// The unconsumed remainder, trimmed.
    pub rest: &'a str,
}

/// Consume leading attributes from the text following a selector.
///
/// `line` is only used for error reporting. When two `=` signs have no
/// whitespace between them the value/name boundary is undecidable; parsing
/// stops there and the unresolved text is returned as the remainder.
pub fn parse_attributes(rest_of_line: &str, line: usize) -> ParseResult<ParsedAttributes<'_>> {
    let mut attributes = Vec::new();
    let mut rest = rest_of_line;

    while !rest.is_empty() {
        let Some(eq) = rest.find('=') else {
            break;
        };
        if rest.find('<').is_some_and(|lt| lt < eq) {
            break;
        }

        let value_start = eq + 1;
        let after = &rest[value_start..];

        let split = if let Some(&(open, close)) = TEMPLATE_DELIMITERS
            .iter()
            .find(|(open, _)| after.starts_with(open))
        {
            let close_at = after[open.len()..]
                .find(close)
                .ok_or_else(|| ParseError::unmatched_template_delimiter(open, line))?;
            value_start + open.len() + close_at + close.len()
        } else if !after.contains('=') {
            rest.find('<').unwrap_or(rest.len())
        } else {
            let next_eq = value_start + after.find('=').unwrap_or(after.len());
            match rest[value_start..next_eq].rfind(is_inline_whitespace) {
                Some(ws) => value_start + ws + 1,
                None => {
                    debug!("line {}: no boundary between attribute values in {:?}", line, rest);
                    break;
                }
            }
        };

        let (chunk, tail) = rest.split_at(split);
        if let Some(attribute) = Attribute::from_chunk(chunk) {
            attributes.push(attribute);
        }
        rest = tail;
    }

    Ok(ParsedAttributes {
        attributes,
        rest: rest.trim(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(parsed: &ParsedAttributes<'_>) -> Vec<String> {
        parsed.attributes.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_empty() {
        let parsed = parse_attributes("", 1).unwrap();
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn test_plain_pairs() {
        let parsed = parse_attributes("href=# target=_blank", 1).unwrap();
        assert_eq!(rendered(&parsed), vec![r##" href="#""##, r#" target="_blank""#]);
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn test_stops_at_inline_content() {
        let parsed = parse_attributes("href=# <asdf>", 1).unwrap();
        assert_eq!(rendered(&parsed), vec![r##" href="#""##]);
        assert_eq!(parsed.rest, "<asdf>");
    }

    #[test]
    fn test_template_values() {
        let parsed = parse_attributes("val1=val1 data-val2=<%= val2 %> <asdf>", 1).unwrap();
        assert_eq!(
            rendered(&parsed),
            vec![r#" val1="val1""#, r#" data-val2="<%= val2 %>""#]
        );
        assert_eq!(parsed.rest, "<asdf>");

        let parsed =
            parse_attributes("val1=val1 data-val2=<%= val2 %> <asdf <%= val3 %>>", 1).unwrap();
        assert_eq!(
            rendered(&parsed),
            vec![r#" val1="val1""#, r#" data-val2="<%= val2 %>""#]
        );
        assert_eq!(parsed.rest, "<asdf <%= val3 %>>");
    }

    #[test]
    fn test_mustache_values_with_spaces() {
        let parsed = parse_attributes("title={{ page.title }} data-x={{x}}", 3).unwrap();
        assert_eq!(
            parsed.attributes,
            vec![
                Attribute::new("title", "{{ page.title }}"),
                Attribute::new("data-x", "{{x}}"),
            ]
        );
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn test_unmatched_template_delimiter() {
        let err = parse_attributes("title={{ page.title", 7).unwrap_err();
        assert_eq!(err, ParseError::unmatched_template_delimiter("{{", 7));
        assert_eq!(err.to_string(), "Unmatched '{{' found in line 7");

        let err = parse_attributes("a=<%= x", 2).unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_ambiguous_boundary_is_left_unparsed() {
        let parsed = parse_attributes("a=b=c d=e", 1).unwrap();
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.rest, "a=b=c d=e");

        let parsed = parse_attributes("x=1 a=b=c", 1).unwrap();
        assert_eq!(parsed.attributes, vec![Attribute::new("x", "1")]);
        assert_eq!(parsed.rest, "a=b=c");
    }

    #[test]
    fn test_no_equals_is_all_remainder() {
        let parsed = parse_attributes("/", 1).unwrap();
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.rest, "/");

        let parsed = parse_attributes("type=text /", 1).unwrap();
        assert_eq!(parsed.attributes, vec![Attribute::new("type", "text /")]);
    }
}
