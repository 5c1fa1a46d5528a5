//! Per-call compilation state.

use log::trace;
use wml_parser::IndentTracker;

use crate::compiler::CompilerOptions;
use crate::emitter::Emitter;
use crate::error::CompileResult;

/// Everything one compile call mutates.
///
/// Created when a compile starts and consumed to produce its output.
#[derive(Debug)]
pub(crate) struct CompilationState<'a> {
    pub(crate) source: &'a str,
    pub(crate) pos: usize,
    pub(crate) indent: IndentTracker,
    pub(crate) current_level: usize,
    pub(crate) previous_level: usize,
    /// 1-based number of the last physical line consumed.
    pub(crate) line_number: usize,
    pub(crate) embedding_token: char,
    pub(crate) emitter: Emitter,
}

impl<'a> CompilationState<'a> {
    pub(crate) fn new(source: &'a str, options: &CompilerOptions) -> Self {
        Self {
            source,
            pos: 0,
            indent: IndentTracker::new(),
            current_level: 0,
            previous_level: 0,
            line_number: 0,
            embedding_token: options.embedding_token,
            emitter: Emitter::new(options.compress),
        }
    }

    /// Compile the whole source.
    pub(crate) fn run(mut self) -> CompileResult<String> {
        while !self.is_eof() {
            self.process_current_level();
            self.close_lower_level_tags();
            self.process_next_line()?;
        }

        self.emitter.close_all(self.indent.unit());
        Ok(self.emitter.into_output())
    }

    /// Unconsumed input.
    pub(crate) fn remaining(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Consume one physical line, without its line break.
    pub(crate) fn next_physical_line(&mut self) -> Option<&'a str> {
        if self.is_eof() {
            return None;
        }
        let remaining = self.remaining();
        let (line, consumed) = match remaining.find('\n') {
            Some(nl) => (&remaining[..nl], nl + 1),
            None => (remaining, remaining.len()),
        };
        self.pos += consumed;
        self.line_number += 1;
        Some(line)
    }

    /// Set the nesting level from the indentation of the next line.
    pub(crate) fn process_current_level(&mut self) {
        self.previous_level = self.current_level;
        self.current_level = self.indent.level_of(self.remaining());
        trace!(
            "line {}: level {} (was {})",
            self.line_number + 1,
            self.current_level,
            self.previous_level
        );
    }

    /// Close the tags the current line is no longer nested inside.
    pub(crate) fn close_lower_level_tags(&mut self) {
        self.emitter
            .close_from(self.current_level, self.indent.unit());
    }
}
