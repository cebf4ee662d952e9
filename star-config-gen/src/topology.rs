use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::StarState;

/// Errors returned when loading a topology file.
#[derive(Debug, Error)]
pub enum TopologyLoadError {
    #[error("failed to read topology file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse topology file {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("failed to parse topology file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Load a [`StarState`] snapshot. `.toml` files are TOML, anything else JSON.
pub fn load_topology(path: &Path) -> Result<StarState, TopologyLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| TopologyLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    if is_toml {
        parse_toml(&raw, path.display().to_string())
    } else {
        parse_json(&raw, path.display().to_string())
    }
}

pub fn parse_toml(raw: &str, path: String) -> Result<StarState, TopologyLoadError> {
    toml::from_str(raw).map_err(|source| TopologyLoadError::Toml { path, source })
}

pub fn parse_json(raw: &str, path: String) -> Result<StarState, TopologyLoadError> {
    serde_json::from_str(raw).map_err(|source| TopologyLoadError::Json { path, source })
}
