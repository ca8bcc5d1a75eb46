//! Token types for the host language.
//!
//! This module defines all token types produced by the lexer.

use crate::utils::location::Span;
use std::fmt;

/// A token in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source span
    pub span: Span,
    /// The lexeme (raw text)
    pub lexeme: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, lexeme: String) -> Self {
        Self { kind, span, lexeme }
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme)
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Integer literal
    Integer,
    /// Floating-point literal
    Float,
    /// String literal
    String,

    // Identifiers. `true` and `false` are predeclared names, not keywords,
    // so they land here too.
    /// Identifier (variable, function name, etc.)
    Identifier,

    // Keywords
    /// `package` keyword
    Package,
    /// `func` keyword
    Func,
    /// `var` keyword
    Var,
    /// `for` keyword
    For,
    /// `range` keyword
    Range,
    /// `if` keyword
    If,
    /// `else` keyword
    Else,
    /// `defer` keyword
    Defer,
    /// `break` keyword
    Break,
    /// `continue` keyword
    Continue,
    /// `return` keyword
    Return,

    // Arithmetic operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,

    // Bitwise operators
    /// `^`
    Caret,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `<<`
    LessLess,
    /// `>>`
    GreaterGreater,

    // Comparison operators
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // Assignment operators
    /// `=`
    Equal,
    /// `:=`
    ColonEqual,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `/=`
    SlashEqual,

    // Logical operators
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `!`
    Bang,

    // Increment/decrement
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,

    // Delimiters
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `;` (explicit or inserted at a newline)
    Semicolon,
    /// `.`
    Dot,

    // Special
    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this is a keyword.
    pub fn is_keyword(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Package | Func | Var | For | Range | If | Else | Defer | Break | Continue | Return
        )
    }

    /// Check if this is a binary or unary operator.
    pub fn is_operator(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Plus | Minus | Star | Slash | Percent | Caret | Amp | Pipe | LessLess
                | GreaterGreater | EqualEqual | BangEqual | Less | LessEqual | Greater
                | GreaterEqual | AmpAmp | PipePipe | Bang
        )
    }

    /// Check if this is a comparison operator.
    pub fn is_comparison(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            EqualEqual | BangEqual | Less | LessEqual | Greater | GreaterEqual
        )
    }

    /// Check if this is an assignment operator (plain, define, or compound).
    pub fn is_assignment(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Equal | ColonEqual | PlusEqual | MinusEqual | StarEqual | SlashEqual
        )
    }

    /// Whether a newline after a token of this kind terminates the statement.
    ///
    /// This is the host language's automatic semicolon insertion rule: a line
    /// ending in an identifier, a literal, `break`/`continue`/`return`, `++`,
    /// `--`, or a closing delimiter gets an implicit `;`.
    pub fn inserts_semicolon(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Identifier | Integer | Float | String | Break | Continue | Return | PlusPlus
                | MinusMinus | RightParen | RightBracket | RightBrace
        )
    }

    /// Get the keyword for a string, if it is a keyword.
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "package" => Some(TokenKind::Package),
            "func" => Some(TokenKind::Func),
            "var" => Some(TokenKind::Var),
            "for" => Some(TokenKind::For),
            "range" => Some(TokenKind::Range),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "defer" => Some(TokenKind::Defer),
            "break" => Some(TokenKind::Break),
            "continue" => Some(TokenKind::Continue),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Get a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Integer => "integer",
            Float => "float",
            String => "string",
            Identifier => "identifier",
            Package => "package",
            Func => "func",
            Var => "var",
            For => "for",
            Range => "range",
            If => "if",
            Else => "else",
            Defer => "defer",
            Break => "break",
            Continue => "continue",
            Return => "return",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Caret => "^",
            Amp => "&",
            Pipe => "|",
            LessLess => "<<",
            GreaterGreater => ">>",
            EqualEqual => "==",
            BangEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Equal => "=",
            ColonEqual => ":=",
            PlusEqual => "+=",
            MinusEqual => "-=",
            StarEqual => "*=",
            SlashEqual => "/=",
            AmpAmp => "&&",
            PipePipe => "||",
            Bang => "!",
            PlusPlus => "++",
            MinusMinus => "--",
            LeftParen => "(",
            RightParen => ")",
            LeftBracket => "[",
            RightBracket => "]",
            LeftBrace => "{",
            RightBrace => "}",
            Comma => ",",
            Semicolon => ";",
            Dot => ".",
            Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
