//! WieldyMarkup line parsing.
//!
//! This crate holds the stateless pieces of the compiler: selector and
//! attribute parsers, the indentation tracker, and small text utilities.
//! The line-driven state machine that ties them together lives in
//! `wml-compiler`.

pub mod attributes;
pub mod error;
pub mod indent;
pub mod selector;
pub mod text;

pub use attributes::{parse_attributes, Attribute, ParsedAttributes};
pub use error::{ErrorCode, ParseError, ParseResult};
pub use indent::IndentTracker;
pub use selector::{parse_selector, Selector, DEFAULT_TAG};
pub use text::{
    leading_whitespace, remove_grouped_text, selector_from_line, tag_nest_level,
    tag_nest_level_with,
};
