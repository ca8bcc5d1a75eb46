//! Emission of host-language source text.
//!
//! The emitter prints a canonical form: tab indentation, one statement per
//! line, cuddled braces. Expression printing is precedence-aware rather
//! than a plain tree walk: desugared trees contain no grouping nodes (the
//! rewriter strips them), so parentheses are reinserted wherever a
//! subexpression binds looser than its context. Grouping the user wrote in
//! untouched statements survives as explicit nodes and prints as written.

use crate::frontend::ast::{
    AssignOp, Block, Expr, ExprKind, Function, Program, Stmt, StmtKind, TypeExpr, TypeExprKind,
    UnaryOp,
};
use crate::utils::pretty::{format_list_with, CodeFormatter};

/// Serialize a program back to source text.
pub fn emit_program(program: &Program) -> String {
    let mut f = CodeFormatter::tabs();
    f.writeln(&format!("package {}", program.package));
    for func in &program.functions {
        f.newline();
        emit_function(&mut f, func);
    }
    f.finish()
}

fn emit_function(f: &mut CodeFormatter, func: &Function) {
    if func.body.is_empty() {
        f.writeln(&format!("func {}() {{}}", func.name));
        return;
    }
    f.block(&format!("func {}()", func.name), |f| {
        emit_stmts(f, &func.body.statements);
    });
}

fn emit_stmts(f: &mut CodeFormatter, stmts: &[Stmt]) {
    for stmt in stmts {
        emit_stmt(f, stmt);
    }
}

fn emit_stmt(f: &mut CodeFormatter, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::VarDecl { names, ty } => {
            f.writeln(&format!("var {} {}", names.join(", "), type_to_string(ty)));
        }
        StmtKind::Assign { targets, op, values } => {
            f.writeln(&assign_to_string(targets, *op, values));
        }
        StmtKind::IncDec { target, increment } => {
            f.writeln(&incdec_to_string(target, *increment));
        }
        StmtKind::Expression { expr } => {
            f.writeln(&expr_to_string(expr));
        }
        StmtKind::For { init, cond, post, body } => {
            let header = match (init, cond, post) {
                (None, None, None) => "for".to_string(),
                (None, Some(cond), None) => format!("for {}", expr_to_string(cond)),
                _ => format!(
                    "for {}; {}; {}",
                    init.as_deref().map(simple_stmt_to_string).unwrap_or_default(),
                    cond.as_ref().map(expr_to_string).unwrap_or_default(),
                    post.as_deref().map(simple_stmt_to_string).unwrap_or_default(),
                ),
            };
            f.block(&header, |f| emit_stmts(f, &body.statements));
        }
        StmtKind::Range { key, value, define, subject, body } => {
            let mut header = String::from("for ");
            if let Some(key) = key {
                header.push_str(&expr_to_string(key));
                if let Some(value) = value {
                    header.push_str(", ");
                    header.push_str(&expr_to_string(value));
                }
                header.push_str(if *define { " := " } else { " = " });
            }
            header.push_str("range ");
            header.push_str(&expr_to_string(subject));
            f.block(&header, |f| emit_stmts(f, &body.statements));
        }
        StmtKind::If { cond, then_branch, else_branch } => {
            emit_if(f, cond, then_branch, else_branch.as_deref());
        }
        StmtKind::Block { block } => {
            f.writeln("{");
            f.indent();
            emit_stmts(f, &block.statements);
            f.dedent();
            f.writeln("}");
        }
        StmtKind::Defer { call } => {
            f.writeln(&format!("defer {}", expr_to_string(call)));
        }
        StmtKind::Break => f.writeln("break"),
        StmtKind::Continue => f.writeln("continue"),
        StmtKind::Return { value } => match value {
            Some(value) => f.writeln(&format!("return {}", expr_to_string(value))),
            None => f.writeln("return"),
        },
    }
}

fn emit_if(f: &mut CodeFormatter, cond: &Expr, then_branch: &Block, mut else_branch: Option<&Stmt>) {
    f.writeln(&format!("if {} {{", expr_to_string(cond)));
    f.indent();
    emit_stmts(f, &then_branch.statements);
    f.dedent();

    while let Some(else_stmt) = else_branch {
        match &else_stmt.kind {
            StmtKind::If { cond, then_branch, else_branch: nested } => {
                f.write("} else ");
                f.writeln(&format!("if {} {{", expr_to_string(cond)));
                f.indent();
                emit_stmts(f, &then_branch.statements);
                f.dedent();
                else_branch = nested.as_deref();
            }
            StmtKind::Block { block } => {
                f.writeln("} else {");
                f.indent();
                emit_stmts(f, &block.statements);
                f.dedent();
                else_branch = None;
            }
            _ => {
                f.writeln("} else {");
                f.indent();
                emit_stmt(f, else_stmt);
                f.dedent();
                else_branch = None;
            }
        }
    }

    f.writeln("}");
}

fn assign_to_string(targets: &[Expr], op: AssignOp, values: &[Expr]) -> String {
    format!(
        "{} {} {}",
        format_list_with(targets, ", ", |e| expr_to_string(e)),
        op,
        format_list_with(values, ", ", |e| expr_to_string(e)),
    )
}

fn incdec_to_string(target: &Expr, increment: bool) -> String {
    format!("{}{}", expr_to_string(target), if increment { "++" } else { "--" })
}

/// Print a for-header clause. The parser only places assignments,
/// increments/decrements, and expression statements in these slots.
fn simple_stmt_to_string(stmt: &Stmt) -> String {
    match &stmt.kind {
        StmtKind::Assign { targets, op, values } => assign_to_string(targets, *op, values),
        StmtKind::IncDec { target, increment } => incdec_to_string(target, *increment),
        StmtKind::Expression { expr } => expr_to_string(expr),
        other => unreachable!("non-simple statement in for header: {:?}", other),
    }
}

fn type_to_string(ty: &TypeExpr) -> String {
    match &ty.kind {
        TypeExprKind::Named(name) => name.clone(),
        TypeExprKind::Array { length, element } => {
            format!("[{}]{}", expr_to_string(length), type_to_string(element))
        }
    }
}

/// Print one expression as source text.
pub fn expr_to_string(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::IntLit(text) | ExprKind::FloatLit(text) => text.clone(),
        ExprKind::StringLit(text) => format!("\"{}\"", text),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Binary { op, left, right } => {
            format!(
                "{} {} {}",
                binary_operand(left, *op, false),
                op,
                binary_operand(right, *op, true),
            )
        }
        ExprKind::Unary { op, operand } => {
            format!("{}{}", op, unary_operand(*op, operand))
        }
        ExprKind::Call { func, args } => {
            format!(
                "{}({})",
                postfix_operand(func),
                format_list_with(args, ", ", |a| expr_to_string(a)),
            )
        }
        ExprKind::Selector { receiver, field } => {
            format!("{}.{}", postfix_operand(receiver), field)
        }
        ExprKind::Index { receiver, index } => {
            format!("{}[{}]", postfix_operand(receiver), expr_to_string(index))
        }
        ExprKind::Paren(inner) => format!("({})", expr_to_string(inner)),
    }
}

/// A binary operand needs grouping when it binds looser than its parent,
/// or equally on the right (all binary operators associate left).
fn binary_operand(expr: &Expr, parent: crate::frontend::ast::BinaryOp, is_right: bool) -> String {
    let needs_parens = match &expr.kind {
        ExprKind::Binary { op, .. } => {
            op.precedence() < parent.precedence()
                || (op.precedence() == parent.precedence() && is_right)
        }
        _ => false,
    };
    if needs_parens {
        format!("({})", expr_to_string(expr))
    } else {
        expr_to_string(expr)
    }
}

/// A unary operand needs grouping when it is a binary expression, or when
/// stacking sign operators would fuse into an increment/decrement token.
fn unary_operand(op: UnaryOp, operand: &Expr) -> String {
    let needs_parens = match &operand.kind {
        ExprKind::Binary { .. } => true,
        ExprKind::Unary { op: inner, .. } => {
            matches!(op, UnaryOp::Neg | UnaryOp::Pos)
                && matches!(inner, UnaryOp::Neg | UnaryOp::Pos)
        }
        _ => false,
    };
    if needs_parens {
        format!("({})", expr_to_string(operand))
    } else {
        expr_to_string(operand)
    }
}

/// A call, selector, or index receiver needs grouping when it is a binary
/// or unary expression; postfix forms bind tighter than both.
fn postfix_operand(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Binary { .. } | ExprKind::Unary { .. } => {
            format!("({})", expr_to_string(expr))
        }
        _ => expr_to_string(expr),
    }
}
