use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{NexusError, Result};
use crate::formatter::SqlFormatOptions;
use crate::json::JsonOptions;

/// Default cap on enumerated regex matches.
pub const DEFAULT_MAX_MATCHES: usize = 200;

/// Defaults for the regex explorer.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegexDefaults {
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

fn default_max_matches() -> usize {
    DEFAULT_MAX_MATCHES
}

impl Default for RegexDefaults {
    fn default() -> Self {
        Self {
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

/// Per-engine option defaults loaded from a config file. Every section is
/// optional; a missing file yields the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sql: SqlFormatOptions,

    #[serde(default)]
    pub json: JsonOptions,

    #[serde(default)]
    pub regex: RegexDefaults,
}

/// Load configuration. An explicit path must exist; otherwise
/// `nexustools.toml` is searched for in the current directory and its
/// parents. The file carries the sections at top level, or nested under
/// `[tool.nexustools]` when sharing another project's TOML file.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_file = match config_path {
        Some(path) => {
            if path.exists() {
                Some(path.to_path_buf())
            } else {
                return Err(NexusError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }
        None => find_config_file(),
    };

    match config_file {
        Some(path) => load_config_from_path(&path),
        None => Ok(Config::default()),
    }
}

fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join("nexustools.toml");
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let parsed: toml::Value = content.parse()?;

    let is_own_file = path
        .file_name()
        .map(|n| n == "nexustools.toml")
        .unwrap_or(false);

    let section = if is_own_file {
        Some(parsed)
    } else {
        parsed
            .get("tool")
            .and_then(|t| t.get("nexustools"))
            .cloned()
    };

    match section {
        Some(value) => value
            .try_into()
            .map_err(|e| NexusError::Config(format!("Failed to parse {}: {}", path.display(), e))),
        None => Ok(Config::default()),
    }
}
