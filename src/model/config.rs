use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration from tagsift.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Rows moved per PageUp/PageDown. 0 means derive from the viewport.
    #[serde(default)]
    pub page_size: usize,
    /// Show each row's penalized score next to its label (for eyeballing
    /// the sort).
    #[serde(default)]
    pub show_scores: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Seed applied to the query whenever the panel opens. If the query
    /// doesn't already start with it, the query is replaced by it, and the
    /// host selects everything past it for overtyping.
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse tagsift.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl Config {
    /// Load `tagsift.toml` from the given directory. A missing file means
    /// defaults; a malformed file is an error, not a silent fallback.
    pub fn load(dir: &Path) -> Result<Config, ConfigError> {
        let path = dir.join("tagsift.toml");
        if !path.exists() {
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        Ok(toml::from_str(&text)?)
    }
}
