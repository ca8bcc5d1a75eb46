//! Lexer for the host language.
//!
//! The lexer converts source text into a stream of tokens. Statement
//! boundaries follow the host language's automatic semicolon insertion: a
//! newline after a token that can end a statement yields a `;` token, so the
//! parser only ever sees explicit terminators.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::{LexError, LexErrorKind};
use crate::utils::location::{SourceLocation, Span};
use std::iter::Peekable;
use std::str::Chars;
use unicode_xid::UnicodeXID;

/// A lexer for tokenizing source code.
pub struct Lexer<'a> {
    /// The source text
    source: &'a str,
    /// Character iterator
    chars: Peekable<Chars<'a>>,
    /// Current byte offset
    offset: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Start of current token
    token_start: SourceLocation,
    /// Whether a newline here terminates the current statement
    insert_semi: bool,
    /// Whether we've hit EOF
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            token_start: SourceLocation::start(),
            insert_semi: false,
            at_eof: false,
        }
    }

    /// Get the current location.
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.offset)
    }

    /// Mark the start of a new token.
    fn mark_token_start(&mut self) {
        self.token_start = self.current_location();
    }

    /// Create a span from token start to current location.
    fn make_span(&self) -> Span {
        Span::from_locations(self.token_start, self.current_location())
    }

    /// Peek at the current character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Peek at the next character (one ahead).
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.offset..].chars();
        chars.next();
        chars.next()
    }

    /// Consume and return the current character.
    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume the current character if it matches.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and comments.
    ///
    /// Returns `true` when the skip consumed a newline that terminates the
    /// current statement; the caller then emits an inserted semicolon. A
    /// block comment spanning lines counts as a newline, as in the host
    /// language.
    fn skip_blanks(&mut self) -> Result<bool, LexError> {
        loop {
            match self.peek() {
                Some('\n') => {
                    if self.insert_semi {
                        self.mark_token_start();
                        self.advance();
                        return Ok(true);
                    }
                    self.advance();
                }
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_next() == Some('/') {
                        // Line comment
                        while self.peek().is_some() && self.peek() != Some('\n') {
                            self.advance();
                        }
                    } else if self.peek_next() == Some('*') {
                        // Block comment
                        self.mark_token_start();
                        self.advance(); // /
                        self.advance(); // *
                        let mut saw_newline = false;
                        loop {
                            match self.advance() {
                                Some('*') if self.peek() == Some('/') => {
                                    self.advance();
                                    break;
                                }
                                Some('\n') => saw_newline = true,
                                Some(_) => {}
                                None => {
                                    return Err(self.make_error(
                                        "unterminated block comment",
                                        LexErrorKind::UnterminatedComment,
                                    ));
                                }
                            }
                        }
                        if saw_newline && self.insert_semi {
                            self.mark_token_start();
                            return Ok(true);
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(false)
    }

    /// Create a token with the given kind.
    fn make_token(&self, kind: TokenKind) -> Token {
        let span = self.make_span();
        let lexeme = self.source[span.start_offset..span.end_offset].to_string();
        Token::new(kind, span, lexeme)
    }

    /// Create an inserted statement terminator.
    fn make_implicit_semi(&self) -> Token {
        Token::new(TokenKind::Semicolon, self.make_span(), "\n".to_string())
    }

    /// Create an error.
    fn make_error(&self, message: &str, kind: LexErrorKind) -> LexError {
        LexError::new(kind, message, self.make_span())
    }

    /// Scan the exponent part of a float, after `e`/`E` was peeked.
    fn scan_exponent(&mut self) -> Result<(), LexError> {
        self.advance(); // e or E
        if self.peek() == Some('+') || self.peek() == Some('-') {
            self.advance();
        }
        if !self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            return Err(self.make_error("exponent has no digits", LexErrorKind::InvalidNumber));
        }
        while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.advance();
        }
        Ok(())
    }

    /// Scan a number literal starting with a digit.
    fn scan_number(&mut self) -> Result<Token, LexError> {
        while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.advance();
        }

        let mut is_float = false;

        // Fractional part; a trailing dot (`2.`) is a valid float.
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                self.advance();
            }
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            is_float = true;
            self.scan_exponent()?;
        }

        if is_float {
            Ok(self.make_token(TokenKind::Float))
        } else {
            Ok(self.make_token(TokenKind::Integer))
        }
    }

    /// Scan a float starting with `.`, after the dot was consumed.
    fn scan_float_fraction(&mut self) -> Result<Token, LexError> {
        while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.advance();
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.scan_exponent()?;
        }
        Ok(self.make_token(TokenKind::Float))
    }

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .map(|c| c.is_xid_continue() || c == '_')
            .unwrap_or(false)
        {
            self.advance();
        }

        let span = self.make_span();
        let lexeme = &self.source[span.start_offset..span.end_offset];

        let kind = TokenKind::keyword(lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, span, lexeme.to_string())
    }

    /// Scan a string literal; the opening quote is already consumed.
    ///
    /// The token's lexeme keeps the written text, quotes and escapes
    /// included; escapes are validated here, not decoded.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') | Some('t') | Some('r') | Some('\\') | Some('"') => {}
                    Some(c) => {
                        return Err(self.make_error(
                            &format!("invalid escape sequence: \\{}", c),
                            LexErrorKind::InvalidEscape,
                        ));
                    }
                    None => {
                        return Err(self.make_error(
                            "unterminated string literal",
                            LexErrorKind::UnterminatedString,
                        ));
                    }
                },
                Some('\n') => {
                    return Err(self.make_error(
                        "unterminated string literal (newline in string)",
                        LexErrorKind::UnterminatedString,
                    ));
                }
                Some(_) => {}
                None => {
                    return Err(self.make_error(
                        "unterminated string literal",
                        LexErrorKind::UnterminatedString,
                    ));
                }
            }
        }

        Ok(self.make_token(TokenKind::String))
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.skip_blanks()? {
            self.insert_semi = false;
            return Ok(self.make_implicit_semi());
        }
        self.mark_token_start();

        let c = match self.advance() {
            Some(c) => c,
            None => {
                if self.insert_semi {
                    self.insert_semi = false;
                    return Ok(self.make_implicit_semi());
                }
                self.at_eof = true;
                return Ok(self.make_token(TokenKind::Eof));
            }
        };

        let token = match c {
            // Single-character tokens
            '(' => Ok(self.make_token(TokenKind::LeftParen)),
            ')' => Ok(self.make_token(TokenKind::RightParen)),
            '[' => Ok(self.make_token(TokenKind::LeftBracket)),
            ']' => Ok(self.make_token(TokenKind::RightBracket)),
            '{' => Ok(self.make_token(TokenKind::LeftBrace)),
            '}' => Ok(self.make_token(TokenKind::RightBrace)),
            ',' => Ok(self.make_token(TokenKind::Comma)),
            ';' => Ok(self.make_token(TokenKind::Semicolon)),
            '^' => Ok(self.make_token(TokenKind::Caret)),
            '%' => Ok(self.make_token(TokenKind::Percent)),

            '.' => {
                if self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                    self.scan_float_fraction()
                } else {
                    Ok(self.make_token(TokenKind::Dot))
                }
            }

            // Operators (potentially multi-character)
            '+' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::PlusEqual))
                } else if self.match_char('+') {
                    Ok(self.make_token(TokenKind::PlusPlus))
                } else {
                    Ok(self.make_token(TokenKind::Plus))
                }
            }
            '-' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::MinusEqual))
                } else if self.match_char('-') {
                    Ok(self.make_token(TokenKind::MinusMinus))
                } else {
                    Ok(self.make_token(TokenKind::Minus))
                }
            }
            '*' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::StarEqual))
                } else {
                    Ok(self.make_token(TokenKind::Star))
                }
            }
            '/' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::SlashEqual))
                } else {
                    Ok(self.make_token(TokenKind::Slash))
                }
            }

            '=' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::EqualEqual))
                } else {
                    Ok(self.make_token(TokenKind::Equal))
                }
            }
            '!' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::BangEqual))
                } else {
                    Ok(self.make_token(TokenKind::Bang))
                }
            }
            ':' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::ColonEqual))
                } else {
                    Err(self.make_error("expected ':='", LexErrorKind::UnexpectedChar))
                }
            }
            '<' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::LessEqual))
                } else if self.match_char('<') {
                    Ok(self.make_token(TokenKind::LessLess))
                } else {
                    Ok(self.make_token(TokenKind::Less))
                }
            }
            '>' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::GreaterEqual))
                } else if self.match_char('>') {
                    Ok(self.make_token(TokenKind::GreaterGreater))
                } else {
                    Ok(self.make_token(TokenKind::Greater))
                }
            }
            '&' => {
                if self.match_char('&') {
                    Ok(self.make_token(TokenKind::AmpAmp))
                } else {
                    Ok(self.make_token(TokenKind::Amp))
                }
            }
            '|' => {
                if self.match_char('|') {
                    Ok(self.make_token(TokenKind::PipePipe))
                } else {
                    Ok(self.make_token(TokenKind::Pipe))
                }
            }

            // String literals
            '"' => self.scan_string(),

            // Numbers
            c if c.is_ascii_digit() => self.scan_number(),

            // Identifiers and keywords
            c if c.is_xid_start() || c == '_' => Ok(self.scan_identifier()),

            // Unknown character
            _ => Err(self.make_error(
                &format!("unexpected character: '{}'", c),
                LexErrorKind::UnexpectedChar,
            )),
        }?;

        self.insert_semi = token.kind.inserts_semicolon();
        Ok(token)
    }

    /// Check if we've reached EOF.
    pub fn is_at_end(&self) -> bool {
        self.at_eof
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_eof {
            None
        } else {
            let result = self.next_token();
            if result.as_ref().map(|t| t.is_eof()).unwrap_or(false) {
                self.at_eof = true;
            }
            Some(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    fn token_kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_whitespace() {
        let tokens = lex("   \t\n\r\n   ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keywords() {
        let kinds = token_kinds("package func var for range if else defer");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Package,
                TokenKind::Func,
                TokenKind::Var,
                TokenKind::For,
                TokenKind::Range,
                TokenKind::If,
                TokenKind::Else,
                // a line ending in `defer` gets no terminator, so EOF follows
                TokenKind::Defer,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        let tokens = lex("foo bar _test x123");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "foo");
        assert_eq!(tokens[1].lexeme, "bar");
        assert_eq!(tokens[2].lexeme, "_test");
        assert_eq!(tokens[3].lexeme, "x123");
    }

    #[test]
    fn test_true_false_are_identifiers() {
        let tokens = lex("true false");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "true");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "false");
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("123 45.67 1e10 3.14e-2 2. .5");
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].lexeme, "123");
        assert_eq!(tokens[1].kind, TokenKind::Float);
        assert_eq!(tokens[1].lexeme, "45.67");
        assert_eq!(tokens[2].kind, TokenKind::Float);
        assert_eq!(tokens[3].kind, TokenKind::Float);
        assert_eq!(tokens[4].kind, TokenKind::Float);
        assert_eq!(tokens[4].lexeme, "2.");
        assert_eq!(tokens[5].kind, TokenKind::Float);
        assert_eq!(tokens[5].lexeme, ".5");
    }

    #[test]
    fn test_operators() {
        let kinds = token_kinds("+ - * / % ^ & | << >> == != < <= > >= && ||");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Caret,
                TokenKind::Amp,
                TokenKind::Pipe,
                TokenKind::LessLess,
                TokenKind::GreaterGreater,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_assignment_operators() {
        let kinds = token_kinds("= := += -= *= /= ++ --");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Equal,
                TokenKind::ColonEqual,
                TokenKind::PlusEqual,
                TokenKind::MinusEqual,
                TokenKind::StarEqual,
                TokenKind::SlashEqual,
                TokenKind::PlusPlus,
                // `--` ends the line, so a terminator is inserted before EOF
                TokenKind::MinusMinus,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        let kinds = token_kinds("( [ { . , ;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftParen,
                TokenKind::LeftBracket,
                TokenKind::LeftBrace,
                TokenKind::Dot,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_semicolon_inserted_at_newline() {
        let kinds = token_kinds("x := 1\ny := 2\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::ColonEqual,
                TokenKind::Integer,
                TokenKind::Semicolon,
                TokenKind::Identifier,
                TokenKind::ColonEqual,
                TokenKind::Integer,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_no_semicolon_after_operator() {
        // A line ending mid-expression continues on the next line.
        let kinds = token_kinds("x +\n1");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Plus,
                TokenKind::Integer,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_no_semicolon_after_open_brace() {
        let kinds = token_kinds("for {\n}");
        assert_eq!(
            kinds,
            vec![
                TokenKind::For,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_semicolon_inserted_at_eof() {
        let kinds = token_kinds("Solve(x)");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_implicit_semi_lexeme_is_newline() {
        let tokens = lex("x\ny");
        assert_eq!(tokens[1].kind, TokenKind::Semicolon);
        assert_eq!(tokens[1].lexeme, "\n");
    }

    #[test]
    fn test_comments() {
        let tokens = lex("foo // comment\nbar");
        assert_eq!(tokens[0].lexeme, "foo");
        // The newline that ends the comment line still terminates `foo`.
        assert_eq!(tokens[1].kind, TokenKind::Semicolon);
        assert_eq!(tokens[2].lexeme, "bar");
    }

    #[test]
    fn test_block_comments() {
        let tokens = lex("foo /* block comment */ bar");
        assert_eq!(tokens[0].lexeme, "foo");
        assert_eq!(tokens[1].lexeme, "bar");
    }

    #[test]
    fn test_multiline_block_comment_acts_as_newline() {
        let kinds = token_kinds("x /* split\nacross lines */ y");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literal_keeps_quotes_and_escapes() {
        let tokens = lex(r#""hello \"world\"""#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, r#""hello \"world\"""#);
    }

    #[test]
    fn test_location_tracking() {
        let tokens = lex("foo +\nbar");
        assert_eq!(tokens[0].span.start_line, 1);
        assert_eq!(tokens[2].span.start_line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let result = Lexer::new("\"oops").tokenize();
        assert!(matches!(
            result,
            Err(LexError { kind: LexErrorKind::UnterminatedString, .. })
        ));
    }

    #[test]
    fn test_invalid_escape() {
        let result = Lexer::new(r#""bad \q escape""#).tokenize();
        assert!(matches!(
            result,
            Err(LexError { kind: LexErrorKind::InvalidEscape, .. })
        ));
    }

    #[test]
    fn test_bare_colon_rejected() {
        let result = Lexer::new("x : 1").tokenize();
        assert!(matches!(
            result,
            Err(LexError { kind: LexErrorKind::UnexpectedChar, .. })
        ));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let result = Lexer::new("x /* never closed").tokenize();
        assert!(matches!(
            result,
            Err(LexError { kind: LexErrorKind::UnterminatedComment, .. })
        ));
    }

    #[test]
    fn test_exponent_without_digits() {
        let result = Lexer::new("1e+").tokenize();
        assert!(matches!(
            result,
            Err(LexError { kind: LexErrorKind::InvalidNumber, .. })
        ));
    }

    #[test]
    fn test_complex_program() {
        let source = r#"
            package main
            func main() {
                var xs [5]Int
                for i := 0; i < 5; i++ {
                    Assert(xs[i] > 0)
                }
                Solve(xs)
            }
        "#;
        let result = Lexer::new(source).tokenize();
        assert!(result.is_ok());
    }
}
