//! Locating and decoding ESTree JSON inputs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hoistwalk_core::Node;
use hoistwalk_core::config::Config;
use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

const TREE_EXTENSION: &str = "json";

#[derive(Debug)]
pub struct LoadedTree {
    pub path: PathBuf,
    pub tree: Node,
}

/// `.json` files at `path`, searched recursively when it is a directory,
/// in file name order.
pub fn discover_files(path: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        if is_tree_file(path) && !config.is_excluded(path) {
            return Ok(vec![path.to_path_buf()]);
        } else {
            return Ok(vec![]);
        }
    }

    let files: Vec<PathBuf> = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_tree_file(e.path()))
        .filter(|e| !config.is_excluded(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    debug!(root = %path.display(), count = files.len(), "discovered tree files");
    Ok(files)
}

/// Decodes `files` in parallel. Files that cannot be read or are not a
/// tree come back as warning messages, in input order.
pub fn load_trees(files: &[PathBuf]) -> (Vec<LoadedTree>, Vec<String>) {
    let results: Vec<Result<LoadedTree>> = files.par_iter().map(|file| load_tree(file)).collect();

    let mut trees = Vec::with_capacity(results.len());
    let mut warnings = Vec::new();
    for result in results {
        match result {
            Ok(tree) => trees.push(tree),
            Err(e) => warnings.push(format!("{:#}", e)),
        }
    }
    (trees, warnings)
}

fn load_tree(path: &Path) -> Result<LoadedTree> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let tree = Node::from_json(&source)
        .with_context(|| format!("Skipping {}", path.display()))?;
    Ok(LoadedTree {
        path: path.to_path_buf(),
        tree,
    })
}

fn is_tree_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == TREE_EXTENSION)
        .unwrap_or(false)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name == "node_modules")
        .unwrap_or(false)
}
