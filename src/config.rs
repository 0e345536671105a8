use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Agent kinds the driver knows how to build.
pub const AGENT_KINDS: [&str; 2] = ["random", "line-completer"];

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub selfplay: SelfPlayConfig,
}

/// Settings for a self-play run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Number of games to play
    pub games: usize,
    /// Agent kind playing X: "random" or "line-completer"
    pub player_x: String,
    /// Agent kind playing O
    pub player_o: String,
    /// RNG seed for reproducible runs; omit for OS entropy
    pub seed: Option<u64>,
    /// Where to write per-game JSON records; omit to skip
    pub record_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            selfplay: SelfPlayConfig::default(),
        }
    }
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            games: 100,
            player_x: "random".to_string(),
            player_o: "line-completer".to_string(),
            seed: None,
            record_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selfplay.games == 0 {
            return Err(ConfigError::Validation(
                "selfplay.games must be > 0".into(),
            ));
        }
        for (side, kind) in [
            ("selfplay.player_x", &self.selfplay.player_x),
            ("selfplay.player_o", &self.selfplay.player_o),
        ] {
            if !AGENT_KINDS.contains(&kind.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{} must be one of {:?}, got '{}'",
                    side, AGENT_KINDS, kind
                )));
            }
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[selfplay]
games = 7
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.selfplay.games, 7);
        // Other fields should be defaults
        assert_eq!(config.selfplay.player_x, "random");
        assert_eq!(config.selfplay.seed, None);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.selfplay.games, default.selfplay.games);
        assert_eq!(config.selfplay.player_o, default.selfplay.player_o);
    }

    #[test]
    fn test_validation_rejects_zero_games() {
        let mut config = AppConfig::default();
        config.selfplay.games = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_agent() {
        let mut config = AppConfig::default();
        config.selfplay.player_o = "minimax".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.selfplay.games, 100);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[selfplay]
games = 5
player_x = "line-completer"
seed = 9
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.selfplay.games, 5);
        assert_eq!(config.selfplay.player_x, "line-completer");
        assert_eq!(config.selfplay.seed, Some(9));
        // Others are defaults
        assert_eq!(config.selfplay.player_o, "line-completer");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_config.toml");
        std::fs::write(&path, "[selfplay]\ngames = 0\n").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config
            .validate()
            .expect("roundtripped config should be valid");
    }
}
