//! Configuration loading and validation for the demo API service.
//!
//! All values are read once at startup from environment variables and an
//! optional `.env` file in the working directory; a real environment variable
//! overrides the same key in `.env`. The resulting [`Config`] is passed
//! explicitly to the components that need it; nothing reads the environment
//! after this point.

use std::{fmt, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Deployment environment, resolved from `NODE_ENV`.
///
/// Only the exact value `production` selects [`Environment::Production`];
/// anything else, including an unset variable, is development.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        if value == "production" {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => f.write_str("production"),
            Environment::Development => f.write_str("development"),
        }
    }
}

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Active environment (`NODE_ENV`).
    #[serde(default)]
    pub node_env: Environment,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    8000
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_env: Environment::default(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from `./.env` and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `.env` exists but cannot be read, if a variable is
    /// present but cannot be parsed, or if validation fails. An absent
    /// `NODE_ENV` is never an error.
    pub fn from_env() -> Result<Self> {
        Self::load(Path::new(".env"), std::env::vars())
    }

    /// Merge `dotenv_path` (when present) under `process_env`, then
    /// deserialise and validate.
    fn load<I>(dotenv_path: &Path, process_env: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut vars = read_dotenv(dotenv_path)?;
        vars.extend(process_env);

        let cfg = config::Config::builder()
            .add_source(config::Environment::default().source(Some(vars)))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("PORT must be a non-zero TCP port");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

/// Key/value pairs from a dotenv file; a missing file yields none.
fn read_dotenv(path: &Path) -> Result<config::Map<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(config::Map::new()),
        Err(e) => return Err(e).with_context(|| format!("failed to open {}", path.display())),
    };
    iter.map(|item| item.with_context(|| format!("failed to parse {}", path.display())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_port(), 8000);
        assert_eq!(default_log_level(), "info");
        assert_eq!(Config::default().node_env, Environment::Development);
    }

    #[test]
    fn only_exact_production_selects_production() {
        assert_eq!(Environment::from("production".to_string()), Environment::Production);
        assert_eq!(Environment::from("Production".to_string()), Environment::Development);
        assert_eq!(Environment::from("staging".to_string()), Environment::Development);
        assert_eq!(Environment::from(String::new()), Environment::Development);
    }

    #[test]
    fn node_env_deserialises_from_string() {
        let c: Config = serde_json::from_str(r#"{"node_env":"production"}"#).unwrap();
        assert!(c.node_env.is_production());
        assert_eq!(c.port, 8000);
    }

    #[test]
    fn missing_node_env_is_development() {
        let c: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(c.node_env, Environment::Development);
    }

    #[test]
    fn validate_rejects_zero_port() {
        let cfg = Config {
            port: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[test]
    fn dotenv_values_are_loaded_and_env_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "NODE_ENV=production\nPORT=9100\nLOG_LEVEL=debug\n").unwrap();

        let c = Config::load(&path, vars(&[("PORT", "9200")])).unwrap();
        assert_eq!(c.node_env, Environment::Production);
        assert_eq!(c.log_level, "debug");
        assert_eq!(c.port, 9200);
    }

    #[test]
    fn missing_dotenv_falls_back_to_env_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = Config::load(&dir.path().join(".env"), vars(&[("PORT", "8123")])).unwrap();
        assert_eq!(c.node_env, Environment::Development);
        assert_eq!(c.port, 8123);
        assert_eq!(c.log_level, "info");
    }

    #[test]
    fn invalid_dotenv_port_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "PORT=0\n").unwrap();
        assert!(Config::load(&path, Vec::new()).is_err());
    }
}
