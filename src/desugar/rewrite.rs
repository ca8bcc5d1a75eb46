//! Rewrite rules that lower recognized forms onto the solver API.
//!
//! Expression rewriting is a single bottom-up pass over an owned tree.
//! Operators and literals with a solver counterpart become method or
//! constructor calls; grouping nodes disappear because method-call shape
//! makes them redundant. Forms outside the mapped surface are rebuilt as
//! written, with their subtrees left alone. The pass never fails.

use crate::frontend::ast::{AssignOp, BinaryOp, Expr, ExprKind, Stmt, StmtKind, UnaryOp};
use crate::utils::location::Span;

use super::recognize::{self, DeclType};

/// Variadic constraint helper lowered to a method on its first argument.
pub const DISTINCT_FUNC: &str = "Distinct";

/// Method names whose call shape is already solver-facing. The call is
/// kept as written; only the receiver and arguments are rewritten.
const CHAIN_METHODS: &[&str] = &["Implies", "Iff", "Ite", "Pow"];

const INT_VAL: &str = "IntVal";
const NUM_VAL: &str = "NumVal";
const TRUE_CTOR: &str = "True";
const FALSE_CTOR: &str = "False";

/// Lower a declaration to a multi-assignment binding each name to a
/// fresh solver variable of the declared type.
pub fn declaration(names: Vec<String>, ty: &DeclType, span: Span) -> Stmt {
    let targets = names.iter().map(|name| Expr::ident(name.clone(), span)).collect();
    let values = names.iter().map(|name| constructor_call(name, ty, span)).collect();
    Stmt::new(StmtKind::Assign { targets, op: AssignOp::Define, values }, span)
}

fn constructor_call(name: &str, ty: &DeclType, span: Span) -> Expr {
    match ty {
        DeclType::Scalar(base) => {
            call(base.var_ctor(), vec![Expr::string_lit(name, span)], span)
        }
        DeclType::Array(base, length) => call(
            base.array_ctor(),
            vec![Expr::string_lit(name, span), Expr::int_lit(length.clone(), span)],
            span,
        ),
    }
}

/// Rewrite one expression tree, bottom-up.
pub fn expression(expr: Expr) -> Expr {
    let span = expr.span;
    match expr.kind {
        ExprKind::Binary { op, left, right } => rewrite_binary(op, *left, *right, span),
        ExprKind::Unary { op, operand } => rewrite_unary(op, *operand, span),
        ExprKind::Call { func, args } => rewrite_call(*func, args, span),
        ExprKind::Paren(inner) => expression(*inner),
        ExprKind::Ident(name) => match name.as_str() {
            "true" => nullary_call(TRUE_CTOR, span),
            "false" => nullary_call(FALSE_CTOR, span),
            _ => Expr::new(ExprKind::Ident(name), span),
        },
        ExprKind::IntLit(text) => {
            let literal = Expr::int_lit(text, span);
            call(INT_VAL, vec![literal], span)
        }
        ExprKind::FloatLit(text) => {
            let literal = Expr::string_lit(text, span);
            call(NUM_VAL, vec![literal], span)
        }
        kind => Expr::new(kind, span),
    }
}

fn rewrite_binary(op: BinaryOp, left: Expr, right: Expr, span: Span) -> Expr {
    if let Some(method) = binary_method(op) {
        return method_call(expression(left), method, vec![expression(right)], span);
    }
    if op == BinaryOp::Ne {
        let eq = method_call(expression(left), "Eq", vec![expression(right)], span);
        return method_call(eq, "Not", Vec::new(), span);
    }
    Expr::new(ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) }, span)
}

fn rewrite_unary(op: UnaryOp, operand: Expr, span: Span) -> Expr {
    match op {
        UnaryOp::Not => method_call(expression(operand), "Not", Vec::new(), span),
        UnaryOp::Neg => method_call(expression(operand), "Neg", Vec::new(), span),
        UnaryOp::Pos => {
            Expr::new(ExprKind::Unary { op, operand: Box::new(operand) }, span)
        }
    }
}

fn rewrite_call(func: Expr, args: Vec<Expr>, span: Span) -> Expr {
    if recognize::is_bare_callee(&func, DISTINCT_FUNC) {
        let mut iter = args.into_iter();
        return match iter.next() {
            Some(first) => {
                let receiver = expression(first);
                let rest = iter.map(expression).collect();
                method_call(receiver, DISTINCT_FUNC, rest, span)
            }
            // An empty Distinct() carries no argument to pivot on; the
            // backend rejects it with its own diagnostic.
            None => Expr::new(ExprKind::Call { func: Box::new(func), args: Vec::new() }, span),
        };
    }
    let func_span = func.span;
    match func.kind {
        ExprKind::Selector { receiver, field } if CHAIN_METHODS.contains(&field.as_str()) => {
            let receiver = expression(*receiver);
            let args = args.into_iter().map(expression).collect();
            method_call(receiver, field, args, span)
        }
        kind => {
            let func = Box::new(Expr::new(kind, func_span));
            Expr::new(ExprKind::Call { func, args }, span)
        }
    }
}

fn binary_method(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Add => Some("Add"),
        BinaryOp::Sub => Some("Sub"),
        BinaryOp::Mul => Some("Mul"),
        BinaryOp::Mod => Some("Mod"),
        BinaryOp::And => Some("And"),
        BinaryOp::Or => Some("Or"),
        BinaryOp::Xor => Some("Xor"),
        BinaryOp::Gt => Some("Gt"),
        BinaryOp::Ge => Some("Ge"),
        BinaryOp::Lt => Some("Lt"),
        BinaryOp::Le => Some("Le"),
        BinaryOp::Eq => Some("Eq"),
        _ => None,
    }
}

/// Synthesized nodes inherit the span of the form they replace.
fn method_call(receiver: Expr, method: impl Into<String>, args: Vec<Expr>, span: Span) -> Expr {
    let selector = Expr::new(
        ExprKind::Selector { receiver: Box::new(receiver), field: method.into() },
        span,
    );
    Expr::new(ExprKind::Call { func: Box::new(selector), args }, span)
}

fn call(name: &str, args: Vec<Expr>, span: Span) -> Expr {
    let func = Box::new(Expr::ident(name, span));
    Expr::new(ExprKind::Call { func, args }, span)
}

fn nullary_call(name: &str, span: Span) -> Expr {
    call(name, Vec::new(), span)
}
