use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A game and the destination ports its traffic uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub name: String,
    #[serde(default)]
    pub tcp: Vec<String>,
    #[serde(default)]
    pub udp: Vec<String>,
}

impl GameEntry {
    /// `(protocol, dst-port list)` pairs with at least one port.
    pub fn port_rules(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        [("tcp", &self.tcp), ("udp", &self.udp)]
            .into_iter()
            .filter(|(_, ports)| !ports.is_empty())
            .map(|(proto, ports)| (proto, ports.join(",")))
    }
}

/// Known games, looked up by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCatalog {
    #[serde(rename = "game", default)]
    pub games: Vec<GameEntry>,
}

impl GameCatalog {
    pub fn find(&self, name: &str) -> Option<&GameEntry> {
        self.games.iter().find(|g| g.name == name)
    }
}

/// Errors returned when loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read game catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse game catalog {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a game catalog from a TOML file.
pub fn load_game_catalog(path: &Path) -> Result<GameCatalog, CatalogLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_catalog(&raw, path.display().to_string())
}

/// Built-in catalog shipped with the binary.
pub fn default_game_catalog() -> GameCatalog {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/catalog/games.toml"));
    match parse_catalog(embedded, "embedded catalog".to_string()) {
        Ok(catalog) if !catalog.games.is_empty() => catalog,
        _ => fallback_game_catalog(),
    }
}

fn parse_catalog(raw: &str, path: String) -> Result<GameCatalog, CatalogLoadError> {
    toml::from_str(raw).map_err(|source| CatalogLoadError::Parse { path, source })
}

fn fallback_game_catalog() -> GameCatalog {
    let steam = |name: &str| GameEntry {
        name: name.to_string(),
        tcp: vec!["27015-27030".to_string(), "27036-27037".to_string()],
        udp: vec![
            "27015-27030".to_string(),
            "4380".to_string(),
            "27036".to_string(),
        ],
    };
    GameCatalog {
        games: vec![steam("Dota 2"), steam("Counter-Strike 2")],
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{default_game_catalog, load_game_catalog, CatalogLoadError};

    #[test]
    fn embedded_catalog_parses() {
        let catalog = default_game_catalog();
        assert!(catalog.games.len() > 2);
        let dota = catalog.find("Dota 2").expect("dota");
        let rules: Vec<(&str, String)> = dota.port_rules().collect();
        assert_eq!(rules[0], ("tcp", "27015-27030,27036-27037".to_string()));
        assert_eq!(rules[1].0, "udp");
    }

    #[test]
    fn loads_user_catalog_and_reports_parse_errors() {
        let mut good = tempfile::NamedTempFile::new().expect("tmp");
        writeln!(good, "[[game]]\nname = \"Custom\"\nudp = [\"9999\"]").expect("write");
        let catalog = load_game_catalog(good.path()).expect("load");
        let custom = catalog.find("Custom").expect("custom");
        assert_eq!(custom.port_rules().count(), 1);

        let mut bad = tempfile::NamedTempFile::new().expect("tmp");
        writeln!(bad, "[[game]]\nname = 5").expect("write");
        assert!(matches!(
            load_game_catalog(bad.path()),
            Err(CatalogLoadError::Parse { .. })
        ));
    }
}
