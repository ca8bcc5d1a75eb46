//! Source loading: wrapping model fragments into a parseable program.
//!
//! Input files are bare statement sequences, not complete programs. The
//! loader wraps them in a fixed scaffold that declares the package, opens
//! the entry function, and binds the solver context before the user's
//! first statement:
//!
//! ```text
//! package main
//! func main() {
//! ccc = NewContext()
//! defer ccc.Close()
//! <input>
//! }
//! ```
//!
//! Every later phase works on the wrapped program; the scaffold statements
//! travel through desugaring untouched and come back out in the generated
//! code, which is what gives the output its runnable shape.

use crate::frontend::ast::{
    walk_expr, walk_stmt, AstVisitor, Block, Expr, ExprKind, Program, Stmt, StmtKind,
};
use crate::utils::location::Span;

/// Name of the function whose body is desugared.
pub const ENTRY_FUNC: &str = "main";

/// Name the scaffold binds the solver context to. The input must not use it
/// for its own variables.
pub const CONTEXT_VAR: &str = "ccc";

/// Text prepended to the input, verbatim.
pub const PREAMBLE: &str = "package main\nfunc main() {\nccc = NewContext()\ndefer ccc.Close()\n";

/// Number of source lines the preamble occupies.
pub const PREAMBLE_LINES: usize = 4;

/// Number of statements the preamble contributes to the entry block.
pub const PREAMBLE_STMTS: usize = 2;

/// Wrap a model fragment into a complete program.
pub fn wrap(source: &str) -> String {
    let mut out = String::with_capacity(PREAMBLE.len() + source.len() + 1);
    out.push_str(PREAMBLE);
    out.push_str(source);
    out.push('}');
    out
}

/// The entry function's body, if the program has one.
pub fn entry_block(program: &Program) -> Option<&Block> {
    program.find_function(ENTRY_FUNC).map(|f| &f.body)
}

/// The entry function's body, mutably.
pub fn entry_block_mut(program: &mut Program) -> Option<&mut Block> {
    program.find_function_mut(ENTRY_FUNC).map(|f| &mut f.body)
}

/// Spans where the input uses the reserved context name.
///
/// Scans the user's statements of the entry block, skipping the scaffold's
/// own bindings. Spans carry wrapped-program coordinates; subtract
/// [`PREAMBLE_LINES`] to recover input line numbers.
pub fn context_var_uses(program: &Program) -> Vec<Span> {
    let mut scan = ConflictScan { spans: Vec::new() };
    if let Some(block) = entry_block(program) {
        for stmt in block.statements.iter().skip(PREAMBLE_STMTS) {
            scan.visit_stmt(stmt);
        }
    }
    scan.spans
}

struct ConflictScan {
    spans: Vec<Span>,
}

impl AstVisitor for ConflictScan {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if let StmtKind::VarDecl { names, .. } = &stmt.kind {
            if names.iter().any(|n| n == CONTEXT_VAR) {
                self.spans.push(stmt.span);
            }
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if let ExprKind::Ident(name) = &expr.kind {
            if name == CONTEXT_VAR {
                self.spans.push(expr.span);
            }
        }
        walk_expr(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend;

    #[test]
    fn test_wrap_is_verbatim() {
        assert_eq!(
            wrap("x := IntVar(\"x\")\n"),
            "package main\nfunc main() {\nccc = NewContext()\ndefer ccc.Close()\nx := IntVar(\"x\")\n}"
        );
    }

    #[test]
    fn test_wrap_without_trailing_newline() {
        // The closing brace lands directly after the last statement; the
        // grammar allows the terminator to be elided there.
        let program = frontend::parse(&wrap("Solve(\"x\")")).unwrap();
        let block = entry_block(&program).unwrap();
        assert_eq!(block.statements.len(), PREAMBLE_STMTS + 1);
    }

    #[test]
    fn test_entry_block_missing() {
        let program = frontend::parse("package main\nfunc other() {}\n").unwrap();
        assert!(entry_block(&program).is_none());
    }

    #[test]
    fn test_preamble_statements_parse() {
        let program = frontend::parse(&wrap("")).unwrap();
        let block = entry_block(&program).unwrap();
        assert_eq!(block.statements.len(), PREAMBLE_STMTS);
        assert!(matches!(block.statements[0].kind, StmtKind::Assign { .. }));
        assert!(matches!(block.statements[1].kind, StmtKind::Defer { .. }));
    }

    #[test]
    fn test_context_var_uses_skips_preamble() {
        let program = frontend::parse(&wrap("x := IntVar(\"x\")\n")).unwrap();
        assert!(context_var_uses(&program).is_empty());
    }

    #[test]
    fn test_context_var_uses_found() {
        let program = frontend::parse(&wrap("ccc := IntVar(\"c\")\nAssert(ccc.Gt(IntVal(0)))\n")).unwrap();
        let uses = context_var_uses(&program);
        assert_eq!(uses.len(), 2);
    }

    #[test]
    fn test_context_var_in_var_decl() {
        let program = frontend::parse(&wrap("var ccc Int\n")).unwrap();
        assert_eq!(context_var_uses(&program).len(), 1);
    }
}
