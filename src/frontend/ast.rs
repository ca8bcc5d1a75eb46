//! Abstract Syntax Tree (AST) for the host language.
//!
//! The AST represents the parsed structure of the input program: the
//! package clause, function declarations, statements, and expressions.
//! Nodes synthesized by the desugaring pass carry dummy spans.

use crate::utils::location::Span;
use crate::utils::pretty::PrettyPrint;
use pretty::{DocAllocator, DocBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete program: one package clause and its function declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Package name from the `package` clause
    pub package: String,
    /// Functions in the program
    pub functions: Vec<Function>,
    /// Source span
    pub span: Span,
}

impl Program {
    /// Create a new empty program.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            functions: Vec::new(),
            span: Span::dummy(),
        }
    }

    /// Find a function by name.
    pub fn find_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Find a function by name, mutably.
    pub fn find_function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.functions.iter_mut().find(|f| f.name == name)
    }
}

/// A function declaration.
///
/// The host grammar only admits niladic functions; parameters would be dead
/// weight since the wrapped entry function never takes any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    /// Function name
    pub name: String,
    /// Function body
    pub body: Block,
    /// Source span
    pub span: Span,
}

/// A block of statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Statements in the block
    pub statements: Vec<Stmt>,
    /// Source span
    pub span: Span,
}

impl Block {
    /// Create an empty block.
    pub fn empty() -> Self {
        Self {
            statements: Vec::new(),
            span: Span::dummy(),
        }
    }

    /// Check if the block is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stmt {
    /// The kind of statement
    pub kind: StmtKind,
    /// Source span
    pub span: Span,
}

impl Stmt {
    /// Create a new statement.
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of a statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StmtKind {
    /// Variable declaration: `var x, y Int`
    VarDecl {
        names: Vec<String>,
        ty: TypeExpr,
    },

    /// Assignment or short declaration: `x, y = a, b` / `x := f()`
    Assign {
        targets: Vec<Expr>,
        op: AssignOp,
        values: Vec<Expr>,
    },

    /// Increment or decrement: `i++` / `i--`
    IncDec {
        target: Expr,
        increment: bool,
    },

    /// Expression statement: `f(x)`
    Expression {
        expr: Expr,
    },

    /// For loop: `for init; cond; post { body }`, `for cond { body }`,
    /// or the bare `for { body }`
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },

    /// Iteration loop: `for k, v := range subject { body }`
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        subject: Expr,
        body: Block,
    },

    /// If statement; the else branch, when present, is a block statement or
    /// another if statement (an `else if` chain)
    If {
        cond: Expr,
        then_branch: Block,
        else_branch: Option<Box<Stmt>>,
    },

    /// Block statement: `{ stmts }`
    Block {
        block: Block,
    },

    /// Deferred call: `defer f()`
    Defer {
        call: Expr,
    },

    /// `break`
    Break,

    /// `continue`
    Continue,

    /// `return` with optional value
    Return {
        value: Option<Expr>,
    },
}

/// A type as written in source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeExpr {
    /// The kind of type
    pub kind: TypeExprKind,
    /// Source span
    pub span: Span,
}

impl TypeExpr {
    /// Create a new type expression.
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The base name if this is a plain named type.
    pub fn named(&self) -> Option<&str> {
        match &self.kind {
            TypeExprKind::Named(name) => Some(name),
            TypeExprKind::Array { .. } => None,
        }
    }
}

/// The kind of a type expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TypeExprKind {
    /// A plain named type: `Int`, `Num`, `Bool`, or anything else
    Named(String),
    /// An array type: `[length]element`
    Array {
        length: Box<Expr>,
        element: Box<TypeExpr>,
    },
}

/// An assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    /// `:=`
    Define,
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignOp::Define => write!(f, ":="),
            AssignOp::Assign => write!(f, "="),
            AssignOp::AddAssign => write!(f, "+="),
            AssignOp::SubAssign => write!(f, "-="),
            AssignOp::MulAssign => write!(f, "*="),
            AssignOp::DivAssign => write!(f, "/="),
        }
    }
}

/// An expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    /// The kind of expression
    pub kind: ExprKind,
    /// Source span
    pub span: Span,
}

impl Expr {
    /// Create a new expression.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create an identifier reference.
    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Ident(name.into()), span)
    }

    /// Create an integer literal from its source text.
    pub fn int_lit(text: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::IntLit(text.into()), span)
    }

    /// Create a string literal holding the given text.
    pub fn string_lit(text: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::StringLit(text.into()), span)
    }

    /// The identifier name if this expression is a bare identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

/// Placeholder expression, used when moving an expression out of a tree
/// slot before replacing it.
impl Default for Expr {
    fn default() -> Self {
        Self::new(ExprKind::Ident(String::new()), Span::dummy())
    }
}

/// The kind of an expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    /// Integer literal, source text preserved verbatim
    IntLit(String),
    /// Floating-point literal, source text preserved verbatim
    FloatLit(String),
    /// String literal; the text between the quotes, escapes as written
    StringLit(String),

    /// Identifier reference
    Ident(String),

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: `op operand`
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Call: `f(args)` or `recv.method(args)`
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },

    /// Selector: `receiver.field`
    Selector {
        receiver: Box<Expr>,
        field: String,
    },

    /// Index: `receiver[index]`
    Index {
        receiver: Box<Expr>,
        index: Box<Expr>,
    },

    /// Parenthesized group: `(inner)`
    Paren(Box<Expr>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,

    // Bitwise
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    Xor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,

    // Comparison
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    // Logical
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// Get the precedence of this operator (higher binds tighter).
    ///
    /// The host language has five binary levels; all comparisons share one.
    pub fn precedence(&self) -> u8 {
        use BinaryOp::*;
        match self {
            Or => 1,
            And => 2,
            Eq | Ne | Lt | Le | Gt | Ge => 3,
            Add | Sub | BitOr | Xor => 4,
            Mul | Div | Mod | Shl | Shr | BitAnd => 5,
        }
    }

    /// Check if this is a comparison operator.
    pub fn is_comparison(&self) -> bool {
        use BinaryOp::*;
        matches!(self, Eq | Ne | Lt | Le | Gt | Ge)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        write!(f, "{}", s)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Negation: `-x`
    Neg,
    /// Logical not: `!x`
    Not,
    /// Identity: `+x`
    Pos,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::Pos => write!(f, "+"),
        }
    }
}

/// Visitor trait for traversing the AST.
///
/// Default implementations walk the whole tree. Override the methods whose
/// nodes you care about and call the matching `walk_*` function to keep
/// descending into children.
pub trait AstVisitor {
    /// Visit a program.
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    /// Visit a function.
    fn visit_function(&mut self, func: &Function) {
        walk_function(self, func);
    }

    /// Visit a block.
    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    /// Visit a statement.
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    /// Visit a type expression.
    fn visit_type_expr(&mut self, ty: &TypeExpr) {
        walk_type_expr(self, ty);
    }

    /// Visit an expression.
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

/// Walk the functions of a program.
pub fn walk_program<V: AstVisitor + ?Sized>(visitor: &mut V, program: &Program) {
    for func in &program.functions {
        visitor.visit_function(func);
    }
}

/// Walk the body of a function.
pub fn walk_function<V: AstVisitor + ?Sized>(visitor: &mut V, func: &Function) {
    visitor.visit_block(&func.body);
}

/// Walk the statements of a block.
pub fn walk_block<V: AstVisitor + ?Sized>(visitor: &mut V, block: &Block) {
    for stmt in &block.statements {
        visitor.visit_stmt(stmt);
    }
}

/// Walk the children of a statement.
pub fn walk_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::VarDecl { ty, .. } => {
            visitor.visit_type_expr(ty);
        }
        StmtKind::Assign { targets, values, .. } => {
            for target in targets {
                visitor.visit_expr(target);
            }
            for value in values {
                visitor.visit_expr(value);
            }
        }
        StmtKind::IncDec { target, .. } => {
            visitor.visit_expr(target);
        }
        StmtKind::Expression { expr } => {
            visitor.visit_expr(expr);
        }
        StmtKind::For { init, cond, post, body } => {
            if let Some(init) = init {
                visitor.visit_stmt(init);
            }
            if let Some(cond) = cond {
                visitor.visit_expr(cond);
            }
            if let Some(post) = post {
                visitor.visit_stmt(post);
            }
            visitor.visit_block(body);
        }
        StmtKind::Range { key, value, subject, body, .. } => {
            if let Some(key) = key {
                visitor.visit_expr(key);
            }
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
            visitor.visit_expr(subject);
            visitor.visit_block(body);
        }
        StmtKind::If { cond, then_branch, else_branch } => {
            visitor.visit_expr(cond);
            visitor.visit_block(then_branch);
            if let Some(else_stmt) = else_branch {
                visitor.visit_stmt(else_stmt);
            }
        }
        StmtKind::Block { block } => {
            visitor.visit_block(block);
        }
        StmtKind::Defer { call } => {
            visitor.visit_expr(call);
        }
        StmtKind::Return { value } => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Break | StmtKind::Continue => {}
    }
}

/// Walk the children of a type expression.
pub fn walk_type_expr<V: AstVisitor + ?Sized>(visitor: &mut V, ty: &TypeExpr) {
    if let TypeExprKind::Array { length, element } = &ty.kind {
        visitor.visit_expr(length);
        visitor.visit_type_expr(element);
    }
}

/// Walk the children of an expression.
pub fn walk_expr<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Unary { operand, .. } => {
            visitor.visit_expr(operand);
        }
        ExprKind::Call { func, args } => {
            visitor.visit_expr(func);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Selector { receiver, .. } => {
            visitor.visit_expr(receiver);
        }
        ExprKind::Index { receiver, index } => {
            visitor.visit_expr(receiver);
            visitor.visit_expr(index);
        }
        ExprKind::Paren(inner) => {
            visitor.visit_expr(inner);
        }
        ExprKind::IntLit(_)
        | ExprKind::FloatLit(_)
        | ExprKind::StringLit(_)
        | ExprKind::Ident(_) => {}
    }
}

// Structural dumps for the `--emit ast` view, in an S-expression layout.

fn sexpr<'a, D: DocAllocator<'a>>(
    allocator: &'a D,
    head: &str,
    items: Vec<DocBuilder<'a, D>>,
) -> DocBuilder<'a, D> {
    let mut doc = allocator.text("(").append(allocator.text(head.to_string()));
    for item in items {
        doc = doc.append(allocator.line()).append(item);
    }
    doc.append(allocator.text(")")).nest(2).group()
}

fn bracketed<'a, D: DocAllocator<'a>>(
    allocator: &'a D,
    items: Vec<DocBuilder<'a, D>>,
) -> DocBuilder<'a, D> {
    let mut doc = allocator.text("[");
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            doc = doc.append(allocator.text(" "));
        }
        doc = doc.append(item);
    }
    doc.append(allocator.text("]"))
}

impl PrettyPrint for Program {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        let mut items = vec![allocator.text(self.package.clone())];
        items.extend(self.functions.iter().map(|f| f.to_doc(allocator)));
        sexpr(allocator, "package", items)
    }
}

impl PrettyPrint for Function {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        let mut items = vec![allocator.text(self.name.clone())];
        items.extend(self.body.statements.iter().map(|s| s.to_doc(allocator)));
        sexpr(allocator, "func", items)
    }
}

impl PrettyPrint for Block {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        sexpr(
            allocator,
            "block",
            self.statements.iter().map(|s| s.to_doc(allocator)).collect(),
        )
    }
}

impl PrettyPrint for TypeExpr {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        match &self.kind {
            TypeExprKind::Named(name) => allocator.text(name.clone()),
            TypeExprKind::Array { length, element } => sexpr(
                allocator,
                "array",
                vec![length.to_doc(allocator), element.to_doc(allocator)],
            ),
        }
    }
}

impl PrettyPrint for Stmt {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        match &self.kind {
            StmtKind::VarDecl { names, ty } => {
                let names = bracketed(
                    allocator,
                    names.iter().map(|n| allocator.text(n.clone())).collect(),
                );
                sexpr(allocator, "var", vec![names, ty.to_doc(allocator)])
            }
            StmtKind::Assign { targets, op, values } => {
                let targets = bracketed(
                    allocator,
                    targets.iter().map(|t| t.to_doc(allocator)).collect(),
                );
                let values = bracketed(
                    allocator,
                    values.iter().map(|v| v.to_doc(allocator)).collect(),
                );
                sexpr(allocator, &op.to_string(), vec![targets, values])
            }
            StmtKind::IncDec { target, increment } => {
                let head = if *increment { "++" } else { "--" };
                sexpr(allocator, head, vec![target.to_doc(allocator)])
            }
            StmtKind::Expression { expr } => sexpr(allocator, "expr", vec![expr.to_doc(allocator)]),
            StmtKind::For { init, cond, post, body } => {
                let slot = |s: Option<DocBuilder<'a, D>>| s.unwrap_or_else(|| allocator.text("_"));
                sexpr(
                    allocator,
                    "for",
                    vec![
                        slot(init.as_ref().map(|s| s.to_doc(allocator))),
                        slot(cond.as_ref().map(|e| e.to_doc(allocator))),
                        slot(post.as_ref().map(|s| s.to_doc(allocator))),
                        body.to_doc(allocator),
                    ],
                )
            }
            StmtKind::Range { key, value, subject, body, .. } => {
                let slot = |e: Option<DocBuilder<'a, D>>| e.unwrap_or_else(|| allocator.text("_"));
                sexpr(
                    allocator,
                    "range",
                    vec![
                        slot(key.as_ref().map(|e| e.to_doc(allocator))),
                        slot(value.as_ref().map(|e| e.to_doc(allocator))),
                        subject.to_doc(allocator),
                        body.to_doc(allocator),
                    ],
                )
            }
            StmtKind::If { cond, then_branch, else_branch } => {
                let mut items = vec![cond.to_doc(allocator), then_branch.to_doc(allocator)];
                if let Some(else_stmt) = else_branch {
                    items.push(else_stmt.to_doc(allocator));
                }
                sexpr(allocator, "if", items)
            }
            StmtKind::Block { block } => block.to_doc(allocator),
            StmtKind::Defer { call } => sexpr(allocator, "defer", vec![call.to_doc(allocator)]),
            StmtKind::Break => allocator.text("(break)"),
            StmtKind::Continue => allocator.text("(continue)"),
            StmtKind::Return { value } => sexpr(
                allocator,
                "return",
                value.iter().map(|v| v.to_doc(allocator)).collect(),
            ),
        }
    }
}

impl PrettyPrint for Expr {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        match &self.kind {
            ExprKind::IntLit(text) | ExprKind::FloatLit(text) => allocator.text(text.clone()),
            ExprKind::StringLit(text) => allocator.text(format!("\"{}\"", text)),
            ExprKind::Ident(name) => allocator.text(name.clone()),
            ExprKind::Binary { op, left, right } => sexpr(
                allocator,
                &op.to_string(),
                vec![left.to_doc(allocator), right.to_doc(allocator)],
            ),
            ExprKind::Unary { op, operand } => {
                sexpr(allocator, &op.to_string(), vec![operand.to_doc(allocator)])
            }
            ExprKind::Call { func, args } => {
                let args = bracketed(
                    allocator,
                    args.iter().map(|a| a.to_doc(allocator)).collect(),
                );
                sexpr(allocator, "call", vec![func.to_doc(allocator), args])
            }
            ExprKind::Selector { receiver, field } => sexpr(
                allocator,
                "sel",
                vec![receiver.to_doc(allocator), allocator.text(field.clone())],
            ),
            ExprKind::Index { receiver, index } => sexpr(
                allocator,
                "index",
                vec![receiver.to_doc(allocator), index.to_doc(allocator)],
            ),
            ExprKind::Paren(inner) => sexpr(allocator, "paren", vec![inner.to_doc(allocator)]),
        }
    }
}
