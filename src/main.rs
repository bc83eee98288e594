// bmath: a calculator for 64-bit bitwise and arithmetic expressions

mod repl;
mod watch;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bmath::output::{self, DisplayOptions};
use bmath::parser::parse::{Context, ParseError};

/// Longest expression line a session accepts.
const MAX_EXPR_LEN: usize = 4096;

/// bmath evaluates infix bitwise/arithmetic expressions over unsigned
/// 64-bit integers.
///
/// With an expression argument it evaluates once and exits; with piped
/// input it evaluates every line; otherwise it starts an interactive
/// prompt where `$name = expr;` assignments persist for the session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to evaluate, e.g. "align(0x1234, 0x1000) >> 8".
    expression: Option<String>,

    /// Uppercase hex output.
    #[arg(short, long)]
    uppercase: bool,

    /// Show the 64-bit binary pattern of each result.
    #[arg(short, long)]
    binary: bool,

    /// Show UTF-8/16/32 views instead of the ASCII character line.
    #[arg(long)]
    unicode: bool,

    /// Re-evaluate FILE whenever it changes.
    #[arg(short, long, value_name = "FILE")]
    watch: Option<PathBuf>,
}

/// Evaluate one line against the session context, printing either the
/// rendered result or a one-line reason to stderr. With `echo` set the
/// expression itself is printed above its result.
fn evaluate(ctx: &mut Context, input: &str, options: &DisplayOptions, echo: bool) -> bool {
    match ctx.parse(input) {
        Ok(value) => {
            if echo {
                println!("{}", input);
            }
            print!("{}", output::render(value, options));
            true
        }
        Err(err) => {
            match err {
                ParseError::NothingToParse => eprintln!("Nothing to parse."),
                ParseError::ExpressionTooLong => eprintln!("Expression too long."),
                ParseError::Invalid => eprintln!("Parse error occurred."),
            }
            false
        }
    }
}

/// Pipe mode: one expression per stdin line, each echoed above its
/// result.
fn run_stdin(ctx: &mut Context, options: &DisplayOptions) -> io::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if evaluate(ctx, &line, options, true) {
            println!();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let options = DisplayOptions {
        uppercase_hex: args.uppercase,
        unicode: args.unicode,
        binary: args.binary,
    };

    if let Some(path) = args.watch {
        return match watch::run(&path, &options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    let mut ctx = Context::new(MAX_EXPR_LEN);

    if let Some(expression) = args.expression {
        return if evaluate(&mut ctx, &expression, &options, false) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let result = if io::stdin().is_terminal() {
        repl::run(&mut ctx, &options)
    } else {
        run_stdin(&mut ctx, &options)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
