//! WieldyMarkup compiler.
//!
//! Compiles the indentation-based WieldyMarkup shorthand into HTML in a
//! single pass over the input:
//!
//! ```text
//! div.card#main
//!   a href=/ <Home>
//!   hr.rule /
//! ```
//!
//! becomes
//!
//! ```text
//! <div id="main" class="card">
//!   <a href="/">Home</a>
//!   <hr class="rule" />
//! </div>
//! ```
//!
//! Nothing is escaped: attribute values and inline text are copied through
//! verbatim, which lets template placeholders such as `{{ name }}` or
//! `<%= name %>` pass unchanged into the output.

pub mod compiler;
mod emitter;
pub mod error;
mod scanner;
mod state;

pub use compiler::{Compiler, CompilerOptions, DEFAULT_EMBEDDING_TOKEN};
pub use emitter::OpenTagFrame;
pub use error::{CompileError, CompileResult};
pub use scanner::CHAIN_SEPARATOR;
pub use wml_parser::{
    leading_whitespace, remove_grouped_text, selector_from_line, tag_nest_level,
    tag_nest_level_with, ErrorCode, ParseError,
};

/// Compile WieldyMarkup to indented HTML.
pub fn compile(source: &str) -> CompileResult<String> {
    compile_with_options(source, &CompilerOptions::default())
}

/// Compile WieldyMarkup with explicit options.
pub fn compile_with_options(source: &str, options: &CompilerOptions) -> CompileResult<String> {
    state::CompilationState::new(source, options).run()
}
