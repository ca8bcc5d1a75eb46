//! Parser for the host language.
//!
//! This module implements a recursive descent parser that converts a stream
//! of tokens into an AST. Statement terminators follow the host language's
//! rules: the lexer inserts them at line ends, and the parser additionally
//! allows them to be elided before a closing `}` or end of input.

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::{ParseError, ParseErrorKind, SolvegenResult};

/// A parser for the host language.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser from a lexer.
    pub fn new(mut lexer: Lexer<'a>) -> SolvegenResult<Self> {
        let first = lexer.next_token()?;
        Ok(Self {
            lexer,
            previous: first.clone(),
            current: first,
        })
    }

    /// Parse a complete program.
    pub fn parse_program(&mut self) -> SolvegenResult<Program> {
        let start = self.current.span;

        self.consume(TokenKind::Package, "expected 'package' clause")?;
        let package = self.consume_identifier("expected package name")?;
        self.expect_terminator()?;

        let mut program = Program::new(package);
        while !self.is_at_end() {
            if self.match_token(TokenKind::Semicolon)? {
                continue;
            }
            program.functions.push(self.parse_function()?);
            self.expect_terminator()?;
        }

        program.span = start.merge(&self.previous.span);
        Ok(program)
    }

    fn parse_function(&mut self) -> SolvegenResult<Function> {
        let start = self.current.span;
        self.consume(TokenKind::Func, "expected 'func'")?;

        let name = self.consume_identifier("expected function name")?;
        self.consume(TokenKind::LeftParen, "expected '(' after function name")?;
        self.consume(TokenKind::RightParen, "expected ')' after '('")?;
        let body = self.parse_block()?;

        Ok(Function {
            name,
            body,
            span: start.merge(&self.previous.span),
        })
    }

    fn parse_block(&mut self) -> SolvegenResult<Block> {
        let start = self.current.span;
        self.consume(TokenKind::LeftBrace, "expected '{'")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            // Stray terminators between statements carry no node.
            if self.match_token(TokenKind::Semicolon)? {
                continue;
            }
            statements.push(self.parse_statement()?);
            self.expect_terminator()?;
        }

        self.consume(TokenKind::RightBrace, "expected '}'")?;

        Ok(Block {
            statements,
            span: start.merge(&self.previous.span),
        })
    }

    fn parse_statement(&mut self) -> SolvegenResult<Stmt> {
        let start = self.current.span;

        let kind = match self.current.kind {
            TokenKind::Var => self.parse_var_decl()?,
            TokenKind::For => self.parse_for_statement()?,
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::Defer => self.parse_defer_statement()?,
            TokenKind::Return => self.parse_return_statement()?,
            TokenKind::Break => {
                self.advance()?;
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.advance()?;
                StmtKind::Continue
            }
            TokenKind::LeftBrace => StmtKind::Block {
                block: self.parse_block()?,
            },
            _ => match self.parse_simple_stmt_or_range(false)? {
                ForClause::Init(stmt) => stmt.kind,
                ForClause::Range { .. } => {
                    return Err(ParseError::new(
                        ParseErrorKind::MalformedStatement,
                        "range clause outside for statement",
                        start,
                    )
                    .into());
                }
            },
        };

        Ok(Stmt::new(kind, start.merge(&self.previous.span)))
    }

    fn parse_var_decl(&mut self) -> SolvegenResult<StmtKind> {
        self.consume(TokenKind::Var, "expected 'var'")?;

        let mut names = vec![self.consume_identifier("expected variable name")?];
        while self.match_token(TokenKind::Comma)? {
            names.push(self.consume_identifier("expected variable name")?);
        }

        let ty = self.parse_type_expr()?;
        Ok(StmtKind::VarDecl { names, ty })
    }

    fn parse_type_expr(&mut self) -> SolvegenResult<TypeExpr> {
        let start = self.current.span;

        if self.match_token(TokenKind::LeftBracket)? {
            let length = self.parse_expression()?;
            self.consume(TokenKind::RightBracket, "expected ']' after array length")?;
            let element = self.parse_type_expr()?;
            let span = start.merge(&self.previous.span);
            return Ok(TypeExpr::new(
                TypeExprKind::Array {
                    length: Box::new(length),
                    element: Box::new(element),
                },
                span,
            ));
        }

        if self.check(TokenKind::Identifier) {
            let name = self.current.lexeme.clone();
            let span = self.current.span;
            self.advance()?;
            return Ok(TypeExpr::new(TypeExprKind::Named(name), span));
        }

        Err(ParseError::new(ParseErrorKind::ExpectedType, "expected type", self.current.span)
            .with_found(self.found_desc())
            .into())
    }

    fn parse_for_statement(&mut self) -> SolvegenResult<StmtKind> {
        self.consume(TokenKind::For, "expected 'for'")?;

        // `for { ... }`
        if self.check(TokenKind::LeftBrace) {
            let body = self.parse_block()?;
            return Ok(StmtKind::For {
                init: None,
                cond: None,
                post: None,
                body,
            });
        }

        // `for range xs { ... }`
        if self.match_token(TokenKind::Range)? {
            let subject = self.parse_expression()?;
            let body = self.parse_block()?;
            return Ok(StmtKind::Range {
                key: None,
                value: None,
                define: false,
                subject,
                body,
            });
        }

        let init = if self.check(TokenKind::Semicolon) {
            None
        } else {
            match self.parse_simple_stmt_or_range(true)? {
                ForClause::Range {
                    mut targets,
                    define,
                    subject,
                } => {
                    if targets.len() > 2 {
                        return Err(ParseError::new(
                            ParseErrorKind::MalformedStatement,
                            "too many variables in range clause",
                            self.previous.span,
                        )
                        .into());
                    }
                    let value = if targets.len() == 2 { targets.pop() } else { None };
                    let key = targets.pop();
                    let body = self.parse_block()?;
                    return Ok(StmtKind::Range {
                        key,
                        value,
                        define,
                        subject,
                        body,
                    });
                }
                ForClause::Init(stmt) => {
                    if self.check(TokenKind::LeftBrace) {
                        // Condition-only loop: `for x < 10 { ... }`
                        let cond = self.stmt_to_cond(stmt)?;
                        let body = self.parse_block()?;
                        return Ok(StmtKind::For {
                            init: None,
                            cond: Some(cond),
                            post: None,
                            body,
                        });
                    }
                    Some(Box::new(stmt))
                }
            }
        };

        self.consume(TokenKind::Semicolon, "expected ';' in for clause")?;
        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::Semicolon, "expected ';' in for clause")?;
        let post = if self.check(TokenKind::LeftBrace) {
            None
        } else {
            Some(Box::new(self.parse_post_stmt()?))
        };
        let body = self.parse_block()?;

        Ok(StmtKind::For {
            init,
            cond,
            post,
            body,
        })
    }

    fn parse_post_stmt(&mut self) -> SolvegenResult<Stmt> {
        match self.parse_simple_stmt_or_range(false)? {
            ForClause::Init(stmt) => Ok(stmt),
            ForClause::Range { .. } => Err(ParseError::new(
                ParseErrorKind::MalformedStatement,
                "range clause outside for statement",
                self.previous.span,
            )
            .into()),
        }
    }

    fn stmt_to_cond(&self, stmt: Stmt) -> SolvegenResult<Expr> {
        match stmt.kind {
            StmtKind::Expression { expr } => Ok(expr),
            _ => Err(ParseError::new(
                ParseErrorKind::MalformedStatement,
                "for loop condition must be an expression",
                stmt.span,
            )
            .into()),
        }
    }

    fn parse_if_statement(&mut self) -> SolvegenResult<StmtKind> {
        self.consume(TokenKind::If, "expected 'if'")?;
        let cond = self.parse_expression()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(TokenKind::Else)? {
            let start = self.current.span;
            if self.check(TokenKind::If) {
                let kind = self.parse_if_statement()?;
                Some(Box::new(Stmt::new(kind, start.merge(&self.previous.span))))
            } else if self.check(TokenKind::LeftBrace) {
                let block = self.parse_block()?;
                let span = block.span;
                Some(Box::new(Stmt::new(StmtKind::Block { block }, span)))
            } else {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    "expected 'if' or block after 'else'",
                    self.current.span,
                )
                .with_found(self.found_desc())
                .into());
            }
        } else {
            None
        };

        Ok(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_defer_statement(&mut self) -> SolvegenResult<StmtKind> {
        self.consume(TokenKind::Defer, "expected 'defer'")?;
        let call = self.parse_expression()?;

        if !matches!(call.kind, ExprKind::Call { .. }) {
            return Err(ParseError::new(
                ParseErrorKind::MalformedStatement,
                "expression in defer must be a function call",
                call.span,
            )
            .into());
        }

        Ok(StmtKind::Defer { call })
    }

    fn parse_return_statement(&mut self) -> SolvegenResult<StmtKind> {
        self.consume(TokenKind::Return, "expected 'return'")?;

        let value = if self.check(TokenKind::Semicolon)
            || self.check(TokenKind::RightBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.parse_expression()?)
        };

        Ok(StmtKind::Return { value })
    }

    /// Parse an assignment, short declaration, increment/decrement, or bare
    /// expression statement. Inside a for header (`allow_range`) the value
    /// position may instead open a range clause.
    fn parse_simple_stmt_or_range(&mut self, allow_range: bool) -> SolvegenResult<ForClause> {
        let start = self.current.span;

        let mut exprs = vec![self.parse_expression()?];
        while self.match_token(TokenKind::Comma)? {
            exprs.push(self.parse_expression()?);
        }

        if let Some(op) = self.match_assign_op()? {
            if allow_range
                && self.check(TokenKind::Range)
                && matches!(op, AssignOp::Define | AssignOp::Assign)
            {
                self.advance()?;
                let subject = self.parse_expression()?;
                return Ok(ForClause::Range {
                    targets: exprs,
                    define: op == AssignOp::Define,
                    subject,
                });
            }

            let mut values = vec![self.parse_expression()?];
            while self.match_token(TokenKind::Comma)? {
                values.push(self.parse_expression()?);
            }

            let kind = StmtKind::Assign {
                targets: exprs,
                op,
                values,
            };
            return Ok(ForClause::Init(Stmt::new(kind, start.merge(&self.previous.span))));
        }

        if self.check(TokenKind::PlusPlus) || self.check(TokenKind::MinusMinus) {
            let increment = self.check(TokenKind::PlusPlus);
            self.advance()?;
            return match exprs.pop() {
                Some(target) if exprs.is_empty() => {
                    let kind = StmtKind::IncDec { target, increment };
                    Ok(ForClause::Init(Stmt::new(kind, start.merge(&self.previous.span))))
                }
                _ => Err(ParseError::new(
                    ParseErrorKind::MalformedStatement,
                    "increment and decrement take a single operand",
                    start.merge(&self.previous.span),
                )
                .into()),
            };
        }

        match exprs.pop() {
            Some(expr) if exprs.is_empty() => {
                let kind = StmtKind::Expression { expr };
                Ok(ForClause::Init(Stmt::new(kind, start.merge(&self.previous.span))))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::MalformedStatement,
                "expected assignment after expression list",
                self.current.span,
            )
            .with_expected(":=")
            .with_expected("=")
            .with_found(self.found_desc())
            .into()),
        }
    }

    fn match_assign_op(&mut self) -> SolvegenResult<Option<AssignOp>> {
        let op = match self.current.kind {
            TokenKind::ColonEqual => Some(AssignOp::Define),
            TokenKind::Equal => Some(AssignOp::Assign),
            TokenKind::PlusEqual => Some(AssignOp::AddAssign),
            TokenKind::MinusEqual => Some(AssignOp::SubAssign),
            TokenKind::StarEqual => Some(AssignOp::MulAssign),
            TokenKind::SlashEqual => Some(AssignOp::DivAssign),
            _ => None,
        };
        if op.is_some() {
            self.advance()?;
        }
        Ok(op)
    }

    // Expression parsing, one function per precedence level.

    fn parse_expression(&mut self) -> SolvegenResult<Expr> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> SolvegenResult<Expr> {
        let mut left = self.parse_and_expr()?;
        while self.match_token(TokenKind::PipePipe)? {
            let right = self.parse_and_expr()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op: BinaryOp::Or,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> SolvegenResult<Expr> {
        let mut left = self.parse_comparison_expr()?;
        while self.match_token(TokenKind::AmpAmp)? {
            let right = self.parse_comparison_expr()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op: BinaryOp::And,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_comparison_expr(&mut self) -> SolvegenResult<Expr> {
        let mut left = self.parse_additive_expr()?;
        loop {
            let op = match self.current.kind {
                TokenKind::EqualEqual => BinaryOp::Eq,
                TokenKind::BangEqual => BinaryOp::Ne,
                TokenKind::Less => BinaryOp::Lt,
                TokenKind::LessEqual => BinaryOp::Le,
                TokenKind::Greater => BinaryOp::Gt,
                TokenKind::GreaterEqual => BinaryOp::Ge,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_additive_expr()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_additive_expr(&mut self) -> SolvegenResult<Expr> {
        let mut left = self.parse_multiplicative_expr()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                TokenKind::Pipe => BinaryOp::BitOr,
                TokenKind::Caret => BinaryOp::Xor,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplicative_expr()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_multiplicative_expr(&mut self) -> SolvegenResult<Expr> {
        let mut left = self.parse_unary_expr()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                TokenKind::LessLess => BinaryOp::Shl,
                TokenKind::GreaterGreater => BinaryOp::Shr,
                TokenKind::Amp => BinaryOp::BitAnd,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_unary_expr()?;
            let span = left.span.merge(&right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> SolvegenResult<Expr> {
        let start = self.current.span;
        let op = match self.current.kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Plus => UnaryOp::Pos,
            _ => return self.parse_postfix_expr(),
        };

        self.advance()?;
        let operand = self.parse_unary_expr()?;
        let span = start.merge(&operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix_expr(&mut self) -> SolvegenResult<Expr> {
        let start = self.current.span;
        let mut expr = self.parse_primary_expr()?;

        loop {
            if self.match_token(TokenKind::Dot)? {
                let field = self.consume_identifier("expected field or method name after '.'")?;
                expr = Expr::new(
                    ExprKind::Selector {
                        receiver: Box::new(expr),
                        field,
                    },
                    start.merge(&self.previous.span),
                );
            } else if self.match_token(TokenKind::LeftParen)? {
                let args = self.parse_args()?;
                self.consume(TokenKind::RightParen, "expected ')' after arguments")?;
                expr = Expr::new(
                    ExprKind::Call {
                        func: Box::new(expr),
                        args,
                    },
                    start.merge(&self.previous.span),
                );
            } else if self.match_token(TokenKind::LeftBracket)? {
                let index = self.parse_expression()?;
                self.consume(TokenKind::RightBracket, "expected ']' after index")?;
                expr = Expr::new(
                    ExprKind::Index {
                        receiver: Box::new(expr),
                        index: Box::new(index),
                    },
                    start.merge(&self.previous.span),
                );
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_primary_expr(&mut self) -> SolvegenResult<Expr> {
        let start = self.current.span;

        match self.current.kind {
            TokenKind::Integer => {
                let text = self.current.lexeme.clone();
                self.advance()?;
                Ok(Expr::int_lit(text, start))
            }
            TokenKind::Float => {
                let text = self.current.lexeme.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::FloatLit(text), start))
            }
            TokenKind::String => {
                let text = self.current.lexeme[1..self.current.lexeme.len() - 1].to_string();
                self.advance()?;
                Ok(Expr::string_lit(text, start))
            }
            TokenKind::Identifier => {
                let name = self.current.lexeme.clone();
                self.advance()?;
                Ok(Expr::ident(name, start))
            }
            TokenKind::LeftParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.consume(TokenKind::RightParen, "expected ')'")?;
                Ok(Expr::new(
                    ExprKind::Paren(Box::new(inner)),
                    start.merge(&self.previous.span),
                ))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                "expected expression",
                start,
            )
            .with_found(self.found_desc())
            .into()),
        }
    }

    fn parse_args(&mut self) -> SolvegenResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
                // Trailing comma before the closing paren.
                if self.check(TokenKind::RightParen) {
                    break;
                }
            }
        }
        Ok(args)
    }

    // Helper methods

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    fn advance(&mut self) -> SolvegenResult<()> {
        let next = self.lexer.next_token()?;
        self.previous = std::mem::replace(&mut self.current, next);
        Ok(())
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> SolvegenResult<()> {
        if self.check(kind) {
            self.advance()
        } else {
            let error_kind = if self.is_at_end() {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::ExpectedToken
            };
            Err(ParseError::new(error_kind, message, self.current.span)
                .with_expected(kind.name())
                .with_found(self.found_desc())
                .into())
        }
    }

    fn consume_identifier(&mut self, message: &str) -> SolvegenResult<String> {
        if self.check(TokenKind::Identifier) {
            let name = self.current.lexeme.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(
                ParseError::new(ParseErrorKind::ExpectedIdentifier, message, self.current.span)
                    .with_found(self.found_desc())
                    .into(),
            )
        }
    }

    fn match_token(&mut self, kind: TokenKind) -> SolvegenResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_terminator(&mut self) -> SolvegenResult<()> {
        if self.match_token(TokenKind::Semicolon)? {
            return Ok(());
        }
        if self.check(TokenKind::RightBrace) || self.is_at_end() {
            return Ok(());
        }
        Err(ParseError::new(
            ParseErrorKind::ExpectedToken,
            "expected ';' or newline after statement",
            self.current.span,
        )
        .with_found(self.found_desc())
        .into())
    }

    fn found_desc(&self) -> String {
        if self.is_at_end() {
            "end of input".to_string()
        } else if self.current.kind == TokenKind::Semicolon && self.current.lexeme == "\n" {
            "newline".to_string()
        } else {
            format!("'{}'", self.current.lexeme)
        }
    }
}

/// What the opening clause of a for statement turned out to be.
enum ForClause {
    Init(Stmt),
    Range {
        targets: Vec<Expr>,
        define: bool,
        subject: Expr,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SolvegenResult<Program> {
        let lexer = Lexer::new(source);
        let mut parser = Parser::new(lexer)?;
        parser.parse_program()
    }

    fn main_stmts(source: &str) -> Vec<Stmt> {
        let program = parse(source).unwrap();
        program.find_function("main").unwrap().body.statements.clone()
    }

    #[test]
    fn test_package_clause() {
        let program = parse("package main\n").unwrap();
        assert_eq!(program.package, "main");
        assert!(program.functions.is_empty());
    }

    #[test]
    fn test_empty_function() {
        let program = parse("package main\nfunc main() {}\n").unwrap();
        assert_eq!(program.functions.len(), 1);
        assert_eq!(program.functions[0].name, "main");
        assert!(program.functions[0].body.is_empty());
    }

    #[test]
    fn test_var_decl() {
        let stmts = main_stmts("package main\nfunc main() {\nvar x Int\n}\n");
        assert_eq!(stmts.len(), 1);
        match &stmts[0].kind {
            StmtKind::VarDecl { names, ty } => {
                assert_eq!(names, &["x".to_string()]);
                assert_eq!(ty.named(), Some("Int"));
            }
            other => panic!("expected var decl, got {:?}", other),
        }
    }

    #[test]
    fn test_var_decl_multiple_names() {
        let stmts = main_stmts("package main\nfunc main() {\nvar a, b, c Num\n}\n");
        match &stmts[0].kind {
            StmtKind::VarDecl { names, .. } => assert_eq!(names.len(), 3),
            other => panic!("expected var decl, got {:?}", other),
        }
    }

    #[test]
    fn test_array_type() {
        let stmts = main_stmts("package main\nfunc main() {\nvar xs [5]Int\n}\n");
        match &stmts[0].kind {
            StmtKind::VarDecl { ty, .. } => match &ty.kind {
                TypeExprKind::Array { length, element } => {
                    assert!(matches!(&length.kind, ExprKind::IntLit(text) if text == "5"));
                    assert_eq!(element.named(), Some("Int"));
                }
                other => panic!("expected array type, got {:?}", other),
            },
            other => panic!("expected var decl, got {:?}", other),
        }
    }

    #[test]
    fn test_var_decl_rejects_initializer() {
        assert!(parse("package main\nfunc main() {\nvar x = 3\n}\n").is_err());
    }

    #[test]
    fn test_short_declaration() {
        let stmts = main_stmts("package main\nfunc main() {\nx := IntVar(\"x\")\n}\n");
        match &stmts[0].kind {
            StmtKind::Assign { targets, op, values } => {
                assert_eq!(*op, AssignOp::Define);
                assert_eq!(targets.len(), 1);
                assert_eq!(targets[0].as_ident(), Some("x"));
                assert!(matches!(&values[0].kind, ExprKind::Call { .. }));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_assignment() {
        let stmts = main_stmts("package main\nfunc main() {\na, b = b, a\n}\n");
        match &stmts[0].kind {
            StmtKind::Assign { targets, op, values } => {
                assert_eq!(*op, AssignOp::Assign);
                assert_eq!(targets.len(), 2);
                assert_eq!(values.len(), 2);
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence() {
        // x + y*z > 3 && ok parses as ((x + (y*z)) > 3) && ok
        let stmts = main_stmts("package main\nfunc main() {\nf(x + y*z > 3 && ok)\n}\n");
        let arg = match &stmts[0].kind {
            StmtKind::Expression { expr } => match &expr.kind {
                ExprKind::Call { args, .. } => args[0].clone(),
                other => panic!("expected call, got {:?}", other),
            },
            other => panic!("expected expression, got {:?}", other),
        };
        match &arg.kind {
            ExprKind::Binary { op: BinaryOp::And, left, .. } => match &left.kind {
                ExprKind::Binary { op: BinaryOp::Gt, left, .. } => match &left.kind {
                    ExprKind::Binary { op: BinaryOp::Add, right, .. } => {
                        assert!(matches!(
                            &right.kind,
                            ExprKind::Binary { op: BinaryOp::Mul, .. }
                        ));
                    }
                    other => panic!("expected addition, got {:?}", other),
                },
                other => panic!("expected comparison, got {:?}", other),
            },
            other => panic!("expected logical and, got {:?}", other),
        }
    }

    #[test]
    fn test_grouping() {
        let stmts = main_stmts("package main\nfunc main() {\nf((a || b) && c)\n}\n");
        let arg = match &stmts[0].kind {
            StmtKind::Expression { expr } => match &expr.kind {
                ExprKind::Call { args, .. } => args[0].clone(),
                other => panic!("expected call, got {:?}", other),
            },
            other => panic!("expected expression, got {:?}", other),
        };
        match &arg.kind {
            ExprKind::Binary { op: BinaryOp::And, left, .. } => {
                assert!(matches!(&left.kind, ExprKind::Paren(_)));
            }
            other => panic!("expected logical and, got {:?}", other),
        }
    }

    #[test]
    fn test_postfix_chain() {
        let stmts = main_stmts("package main\nfunc main() {\na.b(c).d[0]\n}\n");
        match &stmts[0].kind {
            StmtKind::Expression { expr } => {
                assert!(matches!(&expr.kind, ExprKind::Index { .. }));
            }
            other => panic!("expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_if_else_chain() {
        let source = "package main\nfunc main() {\nif a {\nf()\n} else if b {\ng()\n} else {\nh()\n}\n}\n";
        let stmts = main_stmts(source);
        match &stmts[0].kind {
            StmtKind::If { else_branch, .. } => {
                let else_stmt = else_branch.as_ref().expect("else branch");
                match &else_stmt.kind {
                    StmtKind::If { else_branch, .. } => {
                        assert!(else_branch.is_some());
                    }
                    other => panic!("expected nested if, got {:?}", other),
                }
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_for_three_clause() {
        let stmts = main_stmts("package main\nfunc main() {\nfor i := 0; i < n; i++ {\nf(i)\n}\n}\n");
        match &stmts[0].kind {
            StmtKind::For { init, cond, post, .. } => {
                assert!(init.is_some());
                assert!(cond.is_some());
                assert!(matches!(
                    post.as_deref().map(|s| &s.kind),
                    Some(StmtKind::IncDec { increment: true, .. })
                ));
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_for_condition_only() {
        let stmts = main_stmts("package main\nfunc main() {\nfor x < 10 {\nf()\n}\n}\n");
        match &stmts[0].kind {
            StmtKind::For { init, cond, post, .. } => {
                assert!(init.is_none());
                assert!(cond.is_some());
                assert!(post.is_none());
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_for_bare() {
        let stmts = main_stmts("package main\nfunc main() {\nfor {\nbreak\n}\n}\n");
        match &stmts[0].kind {
            StmtKind::For { init, cond, post, body } => {
                assert!(init.is_none() && cond.is_none() && post.is_none());
                assert!(matches!(body.statements[0].kind, StmtKind::Break));
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_for_range() {
        let stmts = main_stmts("package main\nfunc main() {\nfor i, v := range xs {\nf(i, v)\n}\n}\n");
        match &stmts[0].kind {
            StmtKind::Range { key, value, define, subject, .. } => {
                assert!(*define);
                assert_eq!(key.as_ref().and_then(|k| k.as_ident()), Some("i"));
                assert_eq!(value.as_ref().and_then(|v| v.as_ident()), Some("v"));
                assert_eq!(subject.as_ident(), Some("xs"));
            }
            other => panic!("expected range, got {:?}", other),
        }
    }

    #[test]
    fn test_for_range_key_only() {
        let stmts = main_stmts("package main\nfunc main() {\nfor i := range xs {\nf(i)\n}\n}\n");
        match &stmts[0].kind {
            StmtKind::Range { key, value, .. } => {
                assert!(key.is_some());
                assert!(value.is_none());
            }
            other => panic!("expected range, got {:?}", other),
        }
    }

    #[test]
    fn test_defer_requires_call() {
        assert!(parse("package main\nfunc main() {\ndefer f()\n}\n").is_ok());
        assert!(parse("package main\nfunc main() {\ndefer x\n}\n").is_err());
    }

    #[test]
    fn test_trailing_comma_in_call() {
        let stmts = main_stmts("package main\nfunc main() {\nf(a, b,)\n}\n");
        match &stmts[0].kind {
            StmtKind::Expression { expr } => match &expr.kind {
                ExprKind::Call { args, .. } => assert_eq!(args.len(), 2),
                other => panic!("expected call, got {:?}", other),
            },
            other => panic!("expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_terminator() {
        // Two statements on one line with no separator.
        assert!(parse("package main\nfunc main() { x := 1 y := 2 }\n").is_err());
    }

    #[test]
    fn test_string_literal_keeps_escapes() {
        let stmts = main_stmts("package main\nfunc main() {\nSolve(\"a\\tb\")\n}\n");
        match &stmts[0].kind {
            StmtKind::Expression { expr } => match &expr.kind {
                ExprKind::Call { args, .. } => {
                    assert!(matches!(&args[0].kind, ExprKind::StringLit(text) if text == "a\\tb"));
                }
                other => panic!("expected call, got {:?}", other),
            },
            other => panic!("expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_terminator_elided_before_close() {
        // No trailing newline before the closing braces.
        let program = parse("package main\nfunc main() { f() }").unwrap();
        assert_eq!(program.functions[0].body.statements.len(), 1);
    }
}
