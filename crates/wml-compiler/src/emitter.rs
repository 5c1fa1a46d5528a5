//! HTML output and the stack of open tags.

use log::trace;
use smol_str::SmolStr;

use crate::scanner::{LineParse, TagBody};

/// A tag that has been opened and is waiting for its closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenTagFrame {
    /// Nesting level the tag was opened at.
    pub level: usize,
    /// Tag name to close.
    pub tag: SmolStr,
}

impl OpenTagFrame {
    /// Create a new frame.
    pub fn new(level: usize, tag: impl Into<SmolStr>) -> Self {
        Self {
            level,
            tag: tag.into(),
        }
    }
}

/// Owns the output buffer and the open-tag stack.
///
/// Frames are pushed with non-decreasing levels, so popping from the top
/// always closes the innermost tag first.
#[derive(Debug, Default)]
pub(crate) struct Emitter {
    pub(crate) output: String,
    pub(crate) open_tags: Vec<OpenTagFrame>,
    pub(crate) compress: bool,
}

impl Emitter {
    pub(crate) fn new(compress: bool) -> Self {
        Self {
            compress,
            ..Default::default()
        }
    }

    /// Pop the innermost frame and write its closing tag.
    pub(crate) fn close_tag(&mut self, unit: &str) -> bool {
        let Some(frame) = self.open_tags.pop() else {
            return false;
        };
        trace!("close <{}> at level {}", frame.tag, frame.level);
        self.indent(unit, frame.level);
        self.output.push_str("</");
        self.output.push_str(&frame.tag);
        self.output.push('>');
        self.newline();
        true
    }

    /// Close every frame opened at `level` or deeper.
    pub(crate) fn close_from(&mut self, level: usize, unit: &str) {
        while self
            .open_tags
            .last()
            .is_some_and(|frame| frame.level >= level)
        {
            self.close_tag(unit);
        }
    }

    /// Close every remaining frame.
    pub(crate) fn close_all(&mut self, unit: &str) {
        while self.close_tag(unit) {}
    }

    /// Write a line through unchanged.
    pub(crate) fn write_verbatim(&mut self, text: &str, level: usize, unit: &str) {
        self.indent(unit, level);
        self.output.push_str(text);
        self.newline();
    }

    /// Write a parsed tag, pushing a frame unless it closes on this line.
    pub(crate) fn write_tag(&mut self, tag: &LineParse, level: usize, unit: &str) {
        let mut html = opening_tag(tag);

        match &tag.body {
            TagBody::SelfClosing => html.push_str(" />"),
            TagBody::Inline(text) => {
                html.push('>');
                html.push_str(text);
                html.push_str("</");
                html.push_str(&tag.selector.tag);
                html.push('>');
            }
            TagBody::Open => html.push('>'),
        }

        self.indent(unit, level);
        self.output.push_str(&html);
        self.newline();

        if tag.body == TagBody::Open {
            trace!("open <{}> at level {}", tag.selector.tag, level);
            self.open_tags
                .push(OpenTagFrame::new(level, tag.selector.tag.clone()));
        }
    }

    pub(crate) fn into_output(self) -> String {
        self.output
    }

    fn indent(&mut self, unit: &str, level: usize) {
        if !self.compress {
            for _ in 0..level {
                self.output.push_str(unit);
            }
        }
    }

    fn newline(&mut self) {
        if !self.compress {
            self.output.push('\n');
        }
    }
}

/// Render `<tag id=".." class=".." attrs..` without the closing bracket.
fn opening_tag(tag: &LineParse) -> String {
    let selector = &tag.selector;
    let mut html = String::from("<");
    html.push_str(&selector.tag);

    if let Some(id) = &selector.id {
        html.push_str(&format!(" id=\"{}\"", id));
    }
    if !selector.classes.is_empty() {
        html.push_str(&format!(" class=\"{}\"", selector.classes.join(" ")));
    }
    for attribute in &tag.attributes {
        html.push_str(&attribute.to_string());
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wml_parser::{Attribute, Selector};

    fn frames(tags: &[(usize, &str)]) -> Vec<OpenTagFrame> {
        tags.iter()
            .map(|(level, tag)| OpenTagFrame::new(*level, *tag))
            .collect()
    }

    #[test]
    fn test_close_tag() {
        let mut emitter = Emitter::new(false);
        emitter.open_tags = frames(&[(0, "div")]);
        assert!(emitter.close_tag("  "));
        assert_eq!(emitter.output, "</div>\n");
        assert!(emitter.open_tags.is_empty());
        assert!(!emitter.close_tag("  "));

        let mut emitter = Emitter::new(true);
        emitter.open_tags = frames(&[(0, "div")]);
        emitter.close_tag("  ");
        assert_eq!(emitter.output, "</div>");
    }

    #[test]
    fn test_close_from() {
        let mut emitter = Emitter::new(false);
        emitter.open_tags = frames(&[(0, "div"), (1, "div"), (2, "span")]);
        emitter.close_from(0, "  ");
        assert_eq!(emitter.output, "    </span>\n  </div>\n</div>\n");

        let mut emitter = Emitter::new(true);
        emitter.open_tags = frames(&[(0, "div"), (1, "div"), (2, "span")]);
        emitter.close_from(0, "  ");
        assert_eq!(emitter.output, "</span></div></div>");
    }

    #[test]
    fn test_close_from_keeps_shallower_frames() {
        let mut emitter = Emitter::new(false);
        emitter.open_tags = frames(&[(0, "ul"), (1, "li"), (2, "a")]);
        emitter.close_from(1, "\t");
        assert_eq!(emitter.output, "\t\t</a>\n\t</li>\n");
        assert_eq!(emitter.open_tags, frames(&[(0, "ul")]));
    }

    #[test]
    fn test_write_verbatim() {
        let mut emitter = Emitter::new(false);
        emitter.write_verbatim("<div>", 2, "  ");
        assert_eq!(emitter.output, "    <div>\n");

        let mut emitter = Emitter::new(false);
        emitter.write_verbatim("<div>", 3, "\t");
        assert_eq!(emitter.output, "\t\t\t<div>\n");

        let mut emitter = Emitter::new(true);
        emitter.write_verbatim("<div>", 3, "\t");
        assert_eq!(emitter.output, "<div>");
    }

    #[test]
    fn test_write_self_closing_tag() {
        let tag = LineParse {
            selector: Selector {
                tag: "input".into(),
                id: Some("name-input".to_string()),
                classes: vec!["class1".to_string(), "class2".to_string()],
            },
            attributes: vec![
                Attribute::new("type", "text"),
                Attribute::new("value", "Value"),
            ],
            body: TagBody::SelfClosing,
        };
        let mut emitter = Emitter::new(false);
        emitter.write_tag(&tag, 0, "");
        assert_eq!(
            emitter.output,
            "<input id=\"name-input\" class=\"class1 class2\" type=\"text\" value=\"Value\" />\n"
        );
        assert!(emitter.open_tags.is_empty());
    }

    #[test]
    fn test_write_inline_tag() {
        let tag = LineParse {
            selector: Selector::new("span"),
            attributes: Vec::new(),
            body: TagBody::Inline("<%= val1 %>".to_string()),
        };
        let mut emitter = Emitter::new(true);
        emitter.write_tag(&tag, 4, "  ");
        assert_eq!(emitter.output, "<span><%= val1 %></span>");
        assert!(emitter.open_tags.is_empty());
    }

    #[test]
    fn test_write_open_tag_pushes_frame() {
        let tag = LineParse {
            selector: Selector::new("section"),
            attributes: vec![Attribute::new("data-x", "{{ x }}")],
            body: TagBody::Open,
        };
        let mut emitter = Emitter::new(false);
        emitter.write_tag(&tag, 1, "  ");
        assert_eq!(emitter.output, "  <section data-x=\"{{ x }}\">\n");
        assert_eq!(emitter.open_tags, frames(&[(1, "section")]));
    }
}
