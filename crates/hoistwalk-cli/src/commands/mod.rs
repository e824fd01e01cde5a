//! CLI command implementations

pub mod free;
pub mod scopes;

pub use free::FreeArgs;
pub use scopes::ScopesArgs;

use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use hoistwalk_core::config::{Config, load_config_or_default_with_warnings};
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the names every scope declares
    Scopes(ScopesArgs),

    /// Report identifiers no enclosing scope declares
    Free(FreeArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

fn configure_colors(no_color: bool) {
    let no_color_env = std::env::var("NO_COLOR").is_ok();
    if no_color || no_color_env {
        colored::control::set_override(false);
    }
}

fn load_config(path: &Path) -> Config {
    let config_result = load_config_or_default_with_warnings(path);
    report_warnings(&config_result.warnings);
    config_result.config
}

fn report_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}

fn format_span(span: Option<(u64, u64)>) -> String {
    match span {
        Some((start, end)) => format!("{}..{}", start, end),
        None => "-".to_string(),
    }
}
