//! Error types for the transpiler.
//!
//! Each front-end phase has its own typed error carrying a span; the
//! top-level [`SolvegenError`] wraps them for callers of the pipeline.

use crate::utils::location::Span;
use std::fmt;
use thiserror::Error;

/// Top-level error type for the transpiler.
#[derive(Error, Debug)]
pub enum SolvegenError {
    /// Error during lexical analysis
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// Error during parsing
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Error during lexical analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of lex error
    pub kind: LexErrorKind,
}

impl LexError {
    /// Create a new lex error.
    pub fn new(kind: LexErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span, kind }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Classification of lex errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character outside the language's alphabet
    UnexpectedChar,
    /// String literal with no closing quote before newline or EOF
    UnterminatedString,
    /// Block comment with no closing delimiter
    UnterminatedComment,
    /// Malformed numeric literal
    InvalidNumber,
    /// Unknown escape sequence in a string literal
    InvalidEscape,
}

/// Error during parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of parse error
    pub kind: ParseErrorKind,
    /// Tokens that would have been accepted here
    pub expected: Vec<String>,
    /// What was found instead
    pub found: Option<String>,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Record a token that would have been accepted.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected.push(expected.into());
        self
    }

    /// Record the token that was found instead.
    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)?;
        if !self.expected.is_empty() {
            write!(f, " (expected: {})", self.expected.join(", "))?;
        }
        if let Some(ref found) = self.found {
            write!(f, " (found: {})", found)?;
        }
        Ok(())
    }
}

/// Classification of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Token cannot start or continue the current production
    UnexpectedToken,
    /// A specific token was required
    ExpectedToken,
    /// An expression was required
    ExpectedExpression,
    /// An identifier was required
    ExpectedIdentifier,
    /// A type was required
    ExpectedType,
    /// Statement structure is invalid (for headers, assignments)
    MalformedStatement,
    /// Input ended mid-production
    UnexpectedEof,
}

/// Result type using SolvegenError.
pub type SolvegenResult<T> = Result<T, SolvegenError>;
