use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the fillcheck binary.
#[derive(Parser, Debug)]
#[command(
    name = "fillcheck",
    version,
    about = "Reports Array.fill calls that share one object across every slot"
)]
pub struct CliArgs {
    /// Files or directories to lint. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Path to a fillcheck.json file. Defaults to ./fillcheck.json when present.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, ignore_case = true, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log every classification decision at TRACE level.
    #[arg(long = "trace-classifier")]
    pub trace_classifier: bool,

    /// Exit with failure when more than N warnings are reported.
    #[arg(long = "max-warnings", value_name = "N")]
    pub max_warnings: Option<usize>,

    /// Print the available rules and exit.
    #[arg(long = "list-rules")]
    pub list_rules: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `file:line:col - error FC2001: message` with a source snippet.
    Pretty,
    /// A JSON array of diagnostics.
    Json,
}

impl CliArgs {
    /// Whether pretty output should be colored.
    pub fn use_color(&self, is_terminal: bool) -> bool {
        !self.no_color && is_terminal && self.format == OutputFormat::Pretty
    }
}
