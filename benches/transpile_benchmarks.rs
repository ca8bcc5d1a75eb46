//! Benchmarks for the transpiler.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MODEL: &str = "var x, y Int\n\
                     var flags [8]Bool\n\
                     Assert(x*3 + y == 7)\n\
                     Assert(Distinct(x, y))\n\
                     for i := 0; i < 4; i++ {\n\
                     var z Num\n\
                     Assert(z >= 2.5)\n\
                     }\n\
                     Solve(x, y)\n";

/// Benchmark lexer speed on the wrapped scaffold.
fn bench_lexing(c: &mut Criterion) {
    let wrapped = solvegen::loader::wrap(MODEL);

    c.bench_function("lex_model", |b| {
        b.iter(|| {
            let lexer = solvegen::frontend::Lexer::new(black_box(&wrapped));
            lexer.tokenize().unwrap()
        })
    });
}

/// Benchmark parsing speed.
fn bench_parsing(c: &mut Criterion) {
    let wrapped = solvegen::loader::wrap(MODEL);

    c.bench_function("parse_model", |b| {
        b.iter(|| {
            let lexer = solvegen::frontend::Lexer::new(black_box(&wrapped));
            let mut parser = solvegen::frontend::Parser::new(lexer).unwrap();
            parser.parse_program().unwrap()
        })
    });
}

/// Benchmark the full wrap-parse-desugar-emit pipeline.
fn bench_transpile(c: &mut Criterion) {
    c.bench_function("transpile_model", |b| {
        b.iter(|| solvegen::transpile(black_box(MODEL)).unwrap())
    });
}

criterion_group!(benches, bench_lexing, bench_parsing, bench_transpile);
criterion_main!(benches);
