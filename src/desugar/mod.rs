//! Desugaring: rewriting modeling forms into solver API calls.
//!
//! The engine walks the entry function's statements in place. Recognized
//! forms (typed declarations, assert calls, solve calls) are replaced
//! one-for-one; loops, conditionals, and blocks are entered so that nested
//! forms rewrite exactly like top-level ones; everything else passes
//! through untouched. Statement order and count never change.

pub mod recognize;
pub mod rewrite;

use crate::frontend::ast::{Block, Expr, ExprKind, Program, Stmt, StmtKind};
use crate::loader;

/// Desugar the entry function's body in place.
///
/// A program without an entry function is left unchanged; the loader
/// guarantees one exists for wrapped input.
pub fn run(program: &mut Program) {
    if let Some(block) = loader::entry_block_mut(program) {
        desugar_block(block);
    }
}

fn desugar_block(block: &mut Block) {
    for stmt in &mut block.statements {
        desugar_stmt(stmt);
    }
}

fn desugar_stmt(stmt: &mut Stmt) {
    // Declarations are the one form replaced as a whole statement.
    if let Some((names, decl_type)) = recognize::as_declaration(stmt) {
        *stmt = rewrite::declaration(names, &decl_type, stmt.span);
        return;
    }

    match &mut stmt.kind {
        StmtKind::Expression { expr } => {
            if recognize::is_assert_call(expr) {
                rewrite_assert_arg(expr);
            } else if recognize::is_solve_call(expr) {
                rewrite_solve_args(expr);
            }
        }
        StmtKind::For { body, .. } | StmtKind::Range { body, .. } => {
            desugar_block(body);
        }
        StmtKind::If { then_branch, else_branch, .. } => {
            desugar_block(then_branch);
            if let Some(else_stmt) = else_branch {
                desugar_stmt(else_stmt);
            }
        }
        StmtKind::Block { block } => {
            desugar_block(block);
        }
        _ => {}
    }
}

/// Rewrite the single argument of a recognized assert call in place. The
/// call wrapper itself stays as written.
fn rewrite_assert_arg(expr: &mut Expr) {
    if let ExprKind::Call { args, .. } = &mut expr.kind {
        if let Some(arg) = args.first_mut() {
            let owned = std::mem::take(arg);
            *arg = rewrite::expression(owned);
        }
    }
}

/// Replace each identifier argument of a recognized solve call with a
/// string literal holding the identifier's name.
fn rewrite_solve_args(expr: &mut Expr) {
    if let ExprKind::Call { args, .. } = &mut expr.kind {
        for arg in args.iter_mut() {
            if let ExprKind::Ident(name) = &arg.kind {
                *arg = Expr::string_lit(name.clone(), arg.span);
            }
        }
    }
}
