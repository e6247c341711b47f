#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use fillcheck_cli::args::{CliArgs, OutputFormat};
use fillcheck_cli::reporter::{Reporter, render_json};
use fillcheck_cli::{driver, tracing_config};
use fillcheck_rules::builtin_rules;

const EXIT_SUCCESS: i32 = 0;
/// Error diagnostics, or more warnings than `--max-warnings` allows.
const EXIT_LINT_FAILURE: i32 = 1;
/// Configuration or IO failure.
const EXIT_FATAL: i32 = 2;

fn main() {
    let args = CliArgs::parse();
    tracing_config::init_tracing(args.trace_classifier);

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("fillcheck: {err:#}");
            std::process::exit(EXIT_FATAL);
        }
    }
}

fn run(args: &CliArgs) -> Result<i32> {
    if args.list_rules {
        for rule in builtin_rules().iter() {
            println!("{:<40} {}", rule.name(), rule.description());
        }
        return Ok(EXIT_SUCCESS);
    }

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::run(args, &cwd)?;
    let diagnostics: Vec<_> = result.diagnostics().cloned().collect();

    match args.format {
        OutputFormat::Json => println!("{}", render_json(&diagnostics)?),
        OutputFormat::Pretty => {
            let mut reporter = Reporter::new(args.use_color(std::io::stdout().is_terminal()));
            for file in &result.files {
                reporter.add_source(file.name.as_str(), file.source.as_str());
            }
            // render() already ends with a newline
            print!("{}", reporter.render(&diagnostics));
        }
    }

    Ok(exit_code(result.error_count(), result.warning_count(), args.max_warnings))
}

fn exit_code(errors: usize, warnings: usize, max_warnings: Option<usize>) -> i32 {
    let too_many_warnings = max_warnings.is_some_and(|max| warnings > max);
    if errors > 0 || too_many_warnings {
        EXIT_LINT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}
