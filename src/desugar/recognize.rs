//! Recognizer predicates for the modeling forms.
//!
//! Each predicate classifies a node as one fixed form or "no match". A
//! near-match that fails a structural condition (unsupported declared
//! type, computed array length, a solve argument that is not a bare
//! identifier) is not an error: the node simply stays unrecognized and
//! passes through the desugaring untouched.

use crate::frontend::ast::{Expr, ExprKind, Stmt, StmtKind, TypeExpr, TypeExprKind};

/// Callee name of an assertion.
pub const ASSERT_FUNC: &str = "Assert";

/// Callee name of a solve request.
pub const SOLVE_FUNC: &str = "Solve";

/// Base types the modeling notation declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    /// Integer-valued variable
    Int,
    /// Arbitrary-precision numeric variable
    Num,
    /// Boolean variable
    Bool,
}

impl BaseType {
    /// Map a declared type name onto a base type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(BaseType::Int),
            "Num" => Some(BaseType::Num),
            "Bool" => Some(BaseType::Bool),
            _ => None,
        }
    }

    /// Constructor the backend provides for a scalar of this base type.
    pub fn var_ctor(self) -> &'static str {
        match self {
            BaseType::Int => "IntVar",
            BaseType::Num => "NumVar",
            BaseType::Bool => "BoolVar",
        }
    }

    /// Constructor the backend provides for an array of this base type.
    pub fn array_ctor(self) -> &'static str {
        match self {
            BaseType::Int => "IntArrayVar",
            BaseType::Num => "NumArrayVar",
            BaseType::Bool => "BoolArrayVar",
        }
    }
}

/// The declared shape of a recognized declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclType {
    /// A scalar of one base type
    Scalar(BaseType),
    /// A fixed-length array; the length keeps its literal source text
    Array(BaseType, String),
}

/// Match a variable declaration whose type the modeling notation covers.
///
/// The declared type must be a bare base-type name or a literal-length
/// array of one. Anything else (structured types, computed lengths,
/// nested arrays) yields no match.
pub fn as_declaration(stmt: &Stmt) -> Option<(Vec<String>, DeclType)> {
    match &stmt.kind {
        StmtKind::VarDecl { names, ty } => decl_type(ty).map(|dt| (names.clone(), dt)),
        _ => None,
    }
}

fn decl_type(ty: &TypeExpr) -> Option<DeclType> {
    match &ty.kind {
        TypeExprKind::Named(name) => BaseType::from_name(name).map(DeclType::Scalar),
        TypeExprKind::Array { length, element } => {
            let base = match &element.kind {
                TypeExprKind::Named(name) => BaseType::from_name(name)?,
                TypeExprKind::Array { .. } => return None,
            };
            match &length.kind {
                ExprKind::IntLit(text) => Some(DeclType::Array(base, text.clone())),
                _ => None,
            }
        }
    }
}

/// True iff the expression is a call to the assert name with exactly one
/// argument.
pub fn is_assert_call(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Call { func, args } => args.len() == 1 && is_bare_callee(func, ASSERT_FUNC),
        _ => false,
    }
}

/// True iff the expression is a call to the solve name where every
/// argument is a bare identifier. Zero arguments qualifies.
pub fn is_solve_call(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Call { func, args } => {
            is_bare_callee(func, SOLVE_FUNC)
                && args.iter().all(|arg| matches!(arg.kind, ExprKind::Ident(_)))
        }
        _ => false,
    }
}

/// True iff the callee is the given bare name, not a selector or any other
/// expression form.
pub fn is_bare_callee(func: &Expr, name: &str) -> bool {
    matches!(&func.kind, ExprKind::Ident(n) if n == name)
}
