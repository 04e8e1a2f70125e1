//! Configuration file loading for the `chess-rules` tool.
//!
//! Settings live in `chess-rules.toml` in the current directory unless
//! another path is given with `--config`. Every key is optional; command-line
//! flags override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for the `perft` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PerftConfig {
    /// Search depth. Defaults to 4.
    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    4
}

impl Default for PerftConfig {
    fn default() -> Self {
        PerftConfig {
            depth: default_depth(),
        }
    }
}

/// Settings for the `play` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlayConfig {
    /// Half-moves after which a game is abandoned. Defaults to 200.
    #[serde(default = "default_max_plies")]
    pub max_plies: u32,
    /// Fixed seed for the move picker; a fresh one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_plies() -> u32 {
    200
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            max_plies: default_max_plies(),
            seed: None,
        }
    }
}

/// Top-level `chess-rules.toml` contents.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct RulesConfig {
    #[serde(default)]
    pub perft: PerftConfig,
    #[serde(default)]
    pub play: PlayConfig,
}

impl RulesConfig {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`Self::config_path()`] is tried and a missing file yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::read(&path)
                } else {
                    tracing::debug!("no {} found, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Returns the default configuration file path, `chess-rules.toml` in
    /// the working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-rules.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[perft]
depth = 3

[play]
max_plies = 80
seed = 42
"#;

        let config: RulesConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.perft.depth, 3);
        assert_eq!(config.play.max_plies, 80);
        assert_eq!(config.play.seed, Some(42));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RulesConfig = toml::from_str("[play]\nseed = 7\n").unwrap();
        assert_eq!(config.perft, PerftConfig::default());
        assert_eq!(config.play.max_plies, 200);
        assert_eq!(config.play.seed, Some(7));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: RulesConfig = toml::from_str("").unwrap();
        assert_eq!(config, RulesConfig::default());
        assert_eq!(config.perft.depth, 4);
        assert_eq!(config.play.seed, None);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result: Result<RulesConfig, _> = toml::from_str("[perft]\ndepth = \"deep\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(RulesConfig::config_path(), PathBuf::from("chess-rules.toml"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("chess-rules-no-such-config.toml");
        match RulesConfig::load(Some(&path)) {
            Err(ConfigError::ReadError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected ReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "chess-rules-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[perft]\ndepth = 2\n").unwrap();
        let config = RulesConfig::load(Some(&path));
        std::fs::remove_file(&path).ok();
        assert_eq!(config.unwrap().perft.depth, 2);
    }

    #[test]
    fn test_load_without_path_does_not_fail() {
        // Either no chess-rules.toml exists in the test directory or it is valid.
        assert!(RulesConfig::load(None).is_ok());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = RulesConfig {
            perft: PerftConfig { depth: 5 },
            play: PlayConfig {
                max_plies: 30,
                seed: Some(9),
            },
        };
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: RulesConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
