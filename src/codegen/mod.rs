//! Source emission.
//!
//! A single backend prints desugared programs as host-language source
//! text. The AST dump used by inspection tooling lives with the pretty
//! printer instead; this module is only concerned with code a downstream
//! compiler can consume.

pub mod go;

pub use go::{emit_program, expr_to_string};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend;

    #[test]
    fn test_emit_round_trips_through_parser() {
        let source = "package main\n\nfunc main() {\n\tx := f(1, 2)\n\tif x {\n\t\tg()\n\t}\n}\n";
        let program = frontend::parse(source).unwrap();
        assert_eq!(emit_program(&program), source);
    }
}
