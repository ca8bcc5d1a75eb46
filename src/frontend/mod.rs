//! Frontend: Lexer, Parser, and AST for the host language.
//!
//! This module handles parsing of the input language into an AST.
//!
//! ## Language Overview
//!
//! The input language is a small Go-like host grammar with the modeling
//! vocabulary embedded as ordinary declarations and calls:
//!
//! ```text
//! package main
//! func main() {
//!     var x, y Int
//!     Assert(x*3 + y == 7)
//!     Assert(x > 0 && y > 0)
//!     Solve("x", "y")
//! }
//! ```
//!
//! Statements end at line breaks the way they do in the host language: the
//! lexer inserts terminators after line-ending tokens, so the parser only
//! ever sees explicit ones.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

// Re-exports
pub use ast::*;
pub use crate::utils::errors::{LexError, ParseError};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};

use crate::utils::errors::SolvegenResult;

/// Parse source code into an AST.
pub fn parse(source: &str) -> SolvegenResult<ast::Program> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer)?;
    parser.parse_program()
}
