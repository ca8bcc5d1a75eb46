//! End-to-end tests for the transpile pipeline.

use solvegen::transpile;

/// Every output opens with the runner scaffold the loader injects.
const SCAFFOLD_HEAD: &str =
    "package main\n\nfunc main() {\n\tccc = NewContext()\n\tdefer ccc.Close()\n";

fn expect_output(body: &str) -> String {
    format!("{}{}}}\n", SCAFFOLD_HEAD, body)
}

#[test]
fn test_scalar_declaration_assert_solve() {
    let output = transpile("var x Int\nAssert(x > 3)\nSolve(x)\n").expect("Failed to transpile");
    assert_eq!(
        output,
        expect_output("\tx := IntVar(\"x\")\n\tAssert(x.Gt(IntVal(3)))\n\tSolve(\"x\")\n")
    );
}

#[test]
fn test_multi_name_declaration_and_chain_method() {
    let output = transpile("var a, b Num\nAssert(a.Implies(b))\n").expect("Failed to transpile");
    assert_eq!(
        output,
        expect_output("\ta, b := NumVar(\"a\"), NumVar(\"b\")\n\tAssert(a.Implies(b))\n")
    );
}

#[test]
fn test_loop_body_rewrites_header_does_not() {
    let source = "for i := 0; i < 2; i++ {\nvar x Bool\nAssert(x)\n}\n";
    let output = transpile(source).expect("Failed to transpile");
    assert_eq!(
        output,
        expect_output(
            "\tfor i := 0; i < 2; i++ {\n\t\tx := BoolVar(\"x\")\n\t\tAssert(x)\n\t}\n"
        )
    );
}

#[test]
fn test_unrecognized_forms_pass_through() {
    let source = "y := x > 3\nvar s MyType\nvar xs [n]Int\nf(1, 2)\n";
    let output = transpile(source).expect("Failed to transpile");
    assert_eq!(
        output,
        expect_output("\ty := x > 3\n\tvar s MyType\n\tvar xs [n]Int\n\tf(1, 2)\n")
    );
}

#[test]
fn test_array_declaration_with_literal_length() {
    let output = transpile("var xs [4]Int\n").expect("Failed to transpile");
    assert_eq!(output, expect_output("\txs := IntArrayVar(\"xs\", 4)\n"));
}

#[test]
fn test_solve_arguments_become_strings() {
    let output = transpile("Solve(x, y)\n").expect("Failed to transpile");
    assert_eq!(output, expect_output("\tSolve(\"x\", \"y\")\n"));

    // A literal-looking identifier is still an identifier here.
    let output = transpile("Solve(true)\n").expect("Failed to transpile");
    assert_eq!(output, expect_output("\tSolve(\"true\")\n"));
}

#[test]
fn test_solve_with_non_identifier_argument_passes_through() {
    let output = transpile("Solve(x, f(y))\n").expect("Failed to transpile");
    assert_eq!(output, expect_output("\tSolve(x, f(y))\n"));
}

#[test]
fn test_operator_and_literal_rewrites() {
    let output = transpile("Assert(x != y)\n").expect("Failed to transpile");
    assert_eq!(output, expect_output("\tAssert(x.Eq(y).Not())\n"));

    let output = transpile("Assert(w == 2.5)\n").expect("Failed to transpile");
    assert_eq!(output, expect_output("\tAssert(w.Eq(NumVal(\"2.5\")))\n"));

    let output = transpile("Assert(Distinct(a, b, c))\n").expect("Failed to transpile");
    assert_eq!(output, expect_output("\tAssert(a.Distinct(b, c))\n"));
}

#[test]
fn test_rewrite_reaches_nested_blocks() {
    let source = "if p {\n{\nvar q Bool\n}\n} else {\nAssert(2 < r)\n}\n";
    let output = transpile(source).expect("Failed to transpile");
    assert_eq!(
        output,
        expect_output(
            "\tif p {\n\t\t{\n\t\t\tq := BoolVar(\"q\")\n\t\t}\n\t} else {\n\t\tAssert(IntVal(2).Lt(r))\n\t}\n"
        )
    );
}

#[test]
fn test_statement_order_and_count_preserved() {
    let source = "var x Int\ny := 1\nAssert(x > y)\nz := 2\nSolve(x)\n";
    let output = transpile(source).expect("Failed to transpile");
    let body: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with('\t'))
        .collect();
    // Two scaffold statements plus the five input statements, in order.
    assert_eq!(body.len(), 7);
    assert_eq!(body[2], "\tx := IntVar(\"x\")");
    assert_eq!(body[3], "\ty := 1");
    assert_eq!(body[4], "\tAssert(x.Gt(y))");
    assert_eq!(body[5], "\tz := 2");
    assert_eq!(body[6], "\tSolve(\"x\")");
}

#[test]
fn test_reserved_context_name_still_transpiles() {
    let output = transpile("var ccc Int\nAssert(ccc > 1)\n").expect("Failed to transpile");
    assert!(output.contains("\tccc := IntVar(\"ccc\")\n"));
    assert!(output.contains("\tAssert(ccc.Gt(IntVal(1)))\n"));
}

#[test]
fn test_parse_failure_is_fatal() {
    assert!(transpile("Assert(x >\n").is_err());
    assert!(transpile("var x\n").is_err());
    assert!(transpile("for i := 0; i < 2 {\n}\n").is_err());
}

#[test]
fn test_empty_snippet_yields_scaffold_only() {
    let output = transpile("").expect("Failed to transpile");
    assert_eq!(output, expect_output(""));
}
