use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User settings read from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reviewer logins left out of the reviewer list (exact, case-sensitive).
    pub ignored_reviewers: Vec<String>,
    pub limit: Option<usize>,
    pub gh_program: Option<String>,
    pub refresh_interval_secs: Option<u64>,
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pr-overlay").join("config.json"))
}

/// Load `path`, or the default location when `None`. A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match get_config_path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid config in {}", path.display()))
}
