//! Scopes command - lists the names each scope frame starts with

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hoistwalk_core::analysis::{ScopeSummary, scope_summaries};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use super::{Format, configure_colors, format_span, load_config, report_warnings};
use crate::input::{discover_files, load_trees};

#[derive(Args, Debug)]
pub struct ScopesArgs {
    /// ESTree JSON file or directory of files
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: Format,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Serialize)]
pub struct FileScopes {
    pub path: PathBuf,
    pub scopes: Vec<ScopeSummary>,
}

impl ScopesArgs {
    pub fn run(&self) -> Result<ExitCode> {
        configure_colors(self.no_color);

        let config = load_config(&self.path);
        let files = discover_files(&self.path, &config)?;
        if files.is_empty() {
            println!("No ESTree JSON files found.");
            return Ok(ExitCode::SUCCESS);
        }

        let (trees, warnings) = load_trees(&files);
        report_warnings(&warnings);

        let reports: Vec<FileScopes> = trees
            .par_iter()
            .map(|loaded| FileScopes {
                path: loaded.path.clone(),
                scopes: scope_summaries(&loaded.tree),
            })
            .collect();
        info!(files = reports.len(), "collected scope summaries");

        match self.format {
            Format::Json => println!("{}", format_json(&reports)?),
            Format::Pretty => print!("{}", format_pretty(&reports)),
        }
        Ok(ExitCode::SUCCESS)
    }
}

pub fn format_json(reports: &[FileScopes]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

pub fn format_pretty(reports: &[FileScopes]) -> String {
    let mut out = String::new();
    let mut total = 0;

    for report in reports {
        let _ = writeln!(out, "{}", report.path.display().to_string().bold());
        for scope in &report.scopes {
            let names = if scope.names.is_empty() {
                "(none)".dimmed().to_string()
            } else {
                scope.names.join(", ")
            };
            let _ = writeln!(
                out,
                "{}{} {} {}",
                "  ".repeat(scope.depth + 1),
                scope.kind.as_str().cyan(),
                format_span(scope.span).dimmed(),
                names
            );
        }
        total += report.scopes.len();
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Found {} scope(s) in {} file(s)", total, reports.len());
    out
}
