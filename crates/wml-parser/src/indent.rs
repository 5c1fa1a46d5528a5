//! Indentation tracking.

use log::debug;

use crate::text::leading_whitespace;

/// Infers nesting levels from leading whitespace.
///
/// The first indented line fixes the indent unit for the whole document.
/// Every later line's level is the number of whole units at the start of
/// its leading whitespace; any leftover partial unit is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentTracker {
    unit: String,
}

impl IndentTracker {
    /// Create a tracker with no indent unit yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with a preset indent unit.
    pub fn with_unit(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }

    /// The indent unit, empty until the first indented line is seen.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Compute the nesting level of the line at the start of `text`.
    pub fn level_of(&mut self, text: &str) -> usize {
        let leading = leading_whitespace(text);
        if leading.is_empty() {
            return 0;
        }

        if self.unit.is_empty() {
            debug!("indent unit set to {:?}", leading);
            self.unit = leading.to_string();
            return 1;
        }

        let mut level = 0;
        let mut rest = leading;
        while let Some(stripped) = rest.strip_prefix(self.unit.as_str()) {
            rest = stripped;
            level += 1;
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_indent_sets_unit() {
        let mut tracker = IndentTracker::new();
        assert_eq!(tracker.level_of("div"), 0);
        assert_eq!(tracker.unit(), "");
        assert_eq!(tracker.level_of("    div"), 1);
        assert_eq!(tracker.unit(), "    ");
        assert_eq!(tracker.level_of("        span"), 2);
        assert_eq!(tracker.unit(), "    ");
    }

    #[test]
    fn test_preset_unit() {
        let mut tracker = IndentTracker::with_unit("  ");
        assert_eq!(tracker.level_of("    div"), 2);
        assert_eq!(tracker.unit(), "  ");

        let mut tracker = IndentTracker::with_unit("\t");
        assert_eq!(tracker.level_of("\t\tdiv"), 2);
    }

    #[test]
    fn test_partial_unit_is_truncated() {
        let mut tracker = IndentTracker::with_unit("    ");
        assert_eq!(tracker.level_of("      p"), 1);
        assert_eq!(tracker.level_of("  p"), 0);
        assert_eq!(tracker.level_of("\t\tp"), 0);
    }
}
