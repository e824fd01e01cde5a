//! Configuration loading and parsing for Hoistwalk
//!
//! Provides functionality to load and parse `hoistwalk.toml` configuration files.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::analysis::FreeOptions;

pub const CONFIG_FILENAME: &str = "hoistwalk.toml";

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["globals", "exclude", "free"];
const KNOWN_FREE_KEYS: &[&str] = &["fail", "ignore"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub globals: Vec<String>,
    pub exclude: Vec<String>,
    pub free: FreeConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FreeConfig {
    pub fail: bool,
    pub ignore: Vec<String>,
}

impl Config {
    pub fn free_options(&self) -> FreeOptions {
        FreeOptions {
            globals: self.globals.clone(),
            ignore: self.free.ignore.clone(),
        }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.exclude.iter().any(|pattern| path.contains(pattern.as_str()))
    }
}

/// Searches `start` and its ancestors for a config file. A file path
/// starts the search in its directory.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start.to_path_buf()
    };
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config_with_warnings(path: &Path) -> Result<ConfigResult, ConfigError> {
    let content = read_config(path)?;
    let config = parse_config(path, &content)?;
    let warnings = detect_unknown_keys(&content);

    Ok(ConfigResult { config, warnings })
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_config(path: &Path, content: &str) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

fn detect_unknown_keys(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return warnings,
    };

    let known_top: HashSet<&str> = KNOWN_TOP_LEVEL_KEYS.iter().copied().collect();
    for key in table.keys() {
        if !known_top.contains(key.as_str()) {
            warnings.push(format!("Unknown config option: '{}'", key));
        }
    }

    if let Some(toml::Value::Table(free)) = table.get("free") {
        let known_free: HashSet<&str> = KNOWN_FREE_KEYS.iter().copied().collect();
        for key in free.keys() {
            if !known_free.contains(key.as_str()) {
                warnings.push(format!("Unknown config option in [free]: '{}'", key));
            }
        }
    }

    warnings
}

pub fn load_config_or_default_with_warnings(start: &Path) -> ConfigResult {
    match find_config_file(start) {
        Some(path) => match load_config_with_warnings(&path) {
            Ok(result) => result,
            Err(e) => ConfigResult {
                config: Config::default(),
                warnings: vec![e.to_string()],
            },
        },
        None => ConfigResult::default(),
    }
}
