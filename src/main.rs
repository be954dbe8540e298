//! CLI entry point for the `esql-parse` tool.
//!
//! Parses the query given on the command line, or standard input when no
//! arguments are passed, and prints its s-expression. Diagnostics go to
//! standard error and make the process exit with status 1.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use esql_parser::parse_str;
use log::debug;

fn read_query() -> io::Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(" "));
    }
    let mut src = String::new();
    io::stdin().read_to_string(&mut src)?;
    Ok(src)
}

/// Returns whether the query parsed without errors.
fn run() -> io::Result<bool> {
    let src = read_query()?;
    debug!("parsing {} bytes", src.len());
    let parsed = parse_str(&src);

    writeln!(io::stdout().lock(), "{}", parsed.statement().to_sexpr())?;
    let mut stderr = io::stderr().lock();
    for error in parsed.errors() {
        writeln!(stderr, "{error}")?;
    }
    Ok(parsed.is_ok())
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let _ = writeln!(io::stderr(), "esql-parse: {err}");
            ExitCode::FAILURE
        }
    }
}
