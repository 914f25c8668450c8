use std::path::PathBuf;

use clap::Parser;

/// Submit URLs or text to a news authenticity backend and show its verdict.
///
/// Reads one query per line from stdin. With piped input the app waits for the
/// last check to finish before exiting.
#[derive(Parser, Debug)]
#[command(name = "checker", version)]
pub struct Cli {
    /// RON config file. Defaults to ./checker.ron when it exists.
    pub config: Option<PathBuf>,

    /// Print one line per verdict.
    #[arg(short, long, conflicts_with = "verbose")]
    pub silent: bool,

    /// Print the full verdict block (the default).
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Compact,
    #[default]
    Verbose,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.silent {
            OutputMode::Compact
        } else {
            OutputMode::Verbose
        }
    }
}
