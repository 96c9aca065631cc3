//! Runtime configuration for the dashboard service.
//!
//! Scoring itself is deliberately not configurable: the rule vocabularies,
//! weights, and the spam threshold are compiled in. Configuration covers
//! only where the service listens and where it keeps its data.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP API binds to.
    pub bind_address: String,
    /// SQLite database file. Created on first start if missing.
    pub database_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            database_path: "spamsift.sqlite".to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn write_default<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(&Config::default())?;
        std::fs::write(path.as_ref(), yaml).with_context(|| {
            format!("failed to write config file: {}", path.as_ref().display())
        })?;
        Ok(())
    }

    /// sqlx connection string for [`Config::database_path`].
    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database_path)
    }
}
