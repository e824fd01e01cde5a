//! Free command - reports identifier references no enclosing scope declares

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hoistwalk_core::analysis::{FreeOptions, FreeReference, free_references};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use super::{Format, configure_colors, format_span, load_config, report_warnings};
use crate::input::{LoadedTree, discover_files, load_trees};

#[derive(Args, Debug)]
pub struct FreeArgs {
    /// ESTree JSON file or directory of files
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: Format,

    /// Treat NAME as declared in the outermost scope (repeatable)
    #[arg(long = "global", value_name = "NAME")]
    pub globals: Vec<String>,

    /// Exit with code 1 when free references are found
    #[arg(long)]
    pub fail: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Serialize)]
pub struct FileReferences {
    pub path: PathBuf,
    pub references: Vec<FreeReference>,
}

impl FreeArgs {
    pub fn run(&self) -> Result<ExitCode> {
        configure_colors(self.no_color);

        let config = load_config(&self.path);
        let files = discover_files(&self.path, &config)?;
        if files.is_empty() {
            println!("No ESTree JSON files found.");
            return Ok(ExitCode::SUCCESS);
        }

        let mut options = config.free_options();
        options.globals.extend(self.globals.iter().cloned());

        let (trees, mut warnings) = load_trees(&files);
        let (reports, walk_warnings) = collect_references(trees, &options);
        warnings.extend(walk_warnings);
        report_warnings(&warnings);

        let total: usize = reports.iter().map(|r| r.references.len()).sum();
        info!(files = reports.len(), references = total, "collected free references");

        match self.format {
            Format::Json => println!("{}", format_json(&reports)?),
            Format::Pretty => print!("{}", format_pretty(&reports)),
        }

        if self.fails_with(total, config.free.fail) {
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }

    /// Whether `total` references fail the run, from `--fail` or `[free] fail`.
    fn fails_with(&self, total: usize, config_fail: bool) -> bool {
        total > 0 && (self.fail || config_fail)
    }
}

/// Walks every tree in parallel. Trees the walker rejects become warnings.
pub fn collect_references(
    trees: Vec<LoadedTree>,
    options: &FreeOptions,
) -> (Vec<FileReferences>, Vec<String>) {
    let results: Vec<Result<FileReferences, String>> = trees
        .into_par_iter()
        .map(|LoadedTree { path, tree }| match free_references(tree, options) {
            Ok(references) => Ok(FileReferences { path, references }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "walk failed");
                Err(format!("Skipping {}: {}", path.display(), e))
            }
        })
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut warnings = Vec::new();
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(warning) => warnings.push(warning),
        }
    }
    (reports, warnings)
}

pub fn format_json(reports: &[FileReferences]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

pub fn format_pretty(reports: &[FileReferences]) -> String {
    let mut out = String::new();
    let mut total = 0;

    for report in reports {
        for reference in &report.references {
            let _ = writeln!(
                out,
                "{}:{}: {} `{}`",
                report.path.display(),
                format_span(reference.span),
                "free".yellow().bold(),
                reference.name
            );
        }
        total += report.references.len();
    }

    if total == 0 {
        let _ = writeln!(out, "{}", "No free references found.".green());
    } else {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Found {} free reference(s) in {} file(s)",
            total,
            reports.iter().filter(|r| !r.references.is_empty()).count()
        );
    }
    out
}
