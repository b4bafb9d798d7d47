//! Settings file for `tier-tester`.
//!
//! Every key is optional:
//!
//! ```toml
//! backend = "sqlite"
//! database = "tiers.db"
//! log_level = "debug"
//! log_file = "tier-tester.log"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tier_core::db::DbConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Repository backend name, as registered in the repository registry.
    pub backend: String,
    /// Backend connection string. A file path or `:memory:` for SQLite.
    pub database: String,
    /// Level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            database: "tiers.db".to_string(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Values given on the command line. Each one replaces its file setting.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<String>,
    pub database: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Loads `path` when given, otherwise starts from the defaults, then
    /// applies `overrides`.
    pub fn resolve(
        path: Option<&Path>,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(
        &mut self,
        overrides: Overrides,
    ) {
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(file) = overrides.log_file {
            self.log_file = Some(file);
        }
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.backend.clone(),
            connection_string: self.database.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend, "sqlite");
        assert_eq!(config.database, "tiers.db");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config =
            AppConfig::from_toml_str("backend = \"memory\"\n", Path::new("partial.toml")).unwrap();
        assert_eq!(
            config,
            AppConfig {
                backend: "memory".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = AppConfig::from_toml_str("colour = \"blue\"\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config file 'bad.toml'"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AppConfig::from_toml_str(
            "backend = \"memory\"\nlog_level = \"warn\"\n",
            Path::new("c.toml"),
        )
        .unwrap();
        config.apply(Overrides {
            log_level: Some("debug".to_string()),
            database: Some(":memory:".to_string()),
            ..Default::default()
        });

        assert_eq!(config.backend, "memory");
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.db_config(),
            DbConfig {
                backend: "memory".to_string(),
                connection_string: ":memory:".to_string(),
            }
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::load(Path::new("/nonexistent/tier-tester.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
