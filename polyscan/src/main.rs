#![forbid(unsafe_code)]

use std::io::{self, Read, Write};

use clap::Parser;
use miette::IntoDiagnostic;

/// Generate a differential test harness for a polyhedral program.
///
/// Reads one program description on standard input and writes a C source
/// file on standard output. The emitted file enumerates every integer point
/// of the bounded parameter domain and asserts that the `good` and `test`
/// callbacks drive the shared hash accumulator to identical values.
#[derive(Parser)]
#[command(name = "polyscan", version)]
struct Cli {}

fn main() -> miette::Result<()> {
    let _cli = Cli::parse();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .into_diagnostic()?;

    let source = polyscan_harness::render(&input)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(source.as_bytes()).into_diagnostic()?;
    Ok(())
}
