//! Hoistwalk CLI - scope reports for ESTree JSON trees
//!
//! Reads trees produced by any ESTree parser and reports the environments
//! the walker builds for them.

mod commands;
mod input;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use commands::Commands;
use logging::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "hoistwalk",
    author,
    version,
    about = "Scope-aware walker for ESTree JSON trees",
    long_about = "Hoistwalk walks ESTree JSON trees with hoisting-accurate environments.\n\n\
                  It lists the names each scope declares and reports identifiers\n\
                  that no enclosing scope declares."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_enum, default_value = "warn", help = "Set the log level")]
    pub log_level: LogLevel,

    #[arg(long, global = true, help = "Write logs to the specified file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub log_json: bool,
}

/// The log guard drops on return, flushing `--log-file` before the exit code
/// is reported.
fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init_logging(&cli);

    match cli.command {
        Commands::Scopes(args) => args.run(),
        Commands::Free(args) => args.run(),
    }
}
