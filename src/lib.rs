//! # Solvegen - Constraint Model Transpiler
//!
//! A source-to-source transpiler that turns constraint-model snippets
//! written in operator syntax into explicit solver API calls:
//! - Scaffold wrapping of bare statement snippets
//! - Lexing and parsing of the host statement grammar
//! - Recognition of declarations, assertions, and solve requests
//! - Operator and literal desugaring onto the solver surface
//! - Canonical source emission
//!
//! ## Architecture
//!
//! ```text
//! Snippet → Loader → Lexer → Parser → Desugar → Emit → Source
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! let source = "var x Int\nAssert(x > 3)\nSolve(x)\n";
//! let output = solvegen::transpile(source)?;
//! assert!(output.contains("Assert(x.Gt(IntVal(3)))"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codegen;
pub mod desugar;
pub mod frontend;
pub mod loader;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::codegen::{emit_program, expr_to_string};
    pub use crate::frontend::ast::*;
    pub use crate::frontend::{Lexer, Parser, Token, TokenKind};
    pub use crate::utils::errors::*;
    pub use crate::utils::location::{SourceLocation, Span};
    pub use crate::utils::pretty::PrettyPrint;
    pub use crate::{parse, transpile, VERSION};
}

use log::warn;

use crate::utils::errors::SolvegenResult;

/// Parse a statement snippet by wrapping it in the runner scaffold.
pub fn parse(source: &str) -> SolvegenResult<frontend::ast::Program> {
    frontend::parse(&loader::wrap(source))
}

/// Full pipeline: wrap, parse, desugar, and emit a snippet.
pub fn transpile(source: &str) -> SolvegenResult<String> {
    let mut program = parse(source)?;
    for span in loader::context_var_uses(&program) {
        warn!(
            "line {}: \"{}\" names the solver context and shadows the scaffold binding",
            span.start_line.saturating_sub(loader::PREAMBLE_LINES),
            loader::CONTEXT_VAR,
        );
    }
    desugar::run(&mut program);
    Ok(codegen::emit_program(&program))
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
