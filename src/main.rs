//! Solvegen Command Line Interface
//!
//! Usage:
//!   solvegen [OPTIONS] <INPUT> <OUTPUT>
//!   solvegen --help
//!
//! Examples:
//!   solvegen model.txt model.go            # Transpile a snippet
//!   solvegen --emit=ast model.txt tree.txt # Dump the desugared tree
//!   solvegen -vv model.txt model.go        # Show per-phase progress

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use solvegen::prelude::PrettyPrint;

/// Solvegen - Constraint Model Transpiler
#[derive(Parser, Debug)]
#[command(name = "solvegen")]
#[command(version)]
#[command(about = "Transpiles constraint-model snippets to solver API calls", long_about = None)]
struct Cli {
    /// Input file holding the model snippet
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file for the transpiled program
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// What to emit
    #[arg(long, default_value = "code")]
    emit: EmitKind,

    /// Verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress warnings)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitKind {
    /// Transpiled source code
    Code,
    /// Desugared syntax tree
    Ast,
}

const EXIT_USAGE: u8 = 1;
const EXIT_READ: u8 = 2;
const EXIT_TRANSFORM: u8 = 3;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_USAGE,
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    // Initialize logging
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    info!("Solvegen v{}", solvegen::VERSION);
    debug!("Input file: {:?}", cli.input);

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            error!("Failed to read input file {:?}: {}", cli.input, err);
            return ExitCode::from(EXIT_READ);
        }
    };

    match run(&cli, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(EXIT_TRANSFORM)
        }
    }
}

fn run(cli: &Cli, source: &str) -> Result<()> {
    let output = match cli.emit {
        EmitKind::Code => {
            info!("Transpiling...");
            solvegen::transpile(source).context("Failed to transpile input")?
        }
        EmitKind::Ast => {
            info!("Parsing...");
            let mut program = solvegen::parse(source).context("Failed to parse input")?;
            solvegen::desugar::run(&mut program);
            let mut dump = program.pretty();
            dump.push('\n');
            dump
        }
    };

    debug!("Writing {:?}", cli.output);
    fs::write(&cli.output, &output)
        .with_context(|| format!("Failed to write output file: {:?}", cli.output))?;

    info!("Done");
    Ok(())
}
