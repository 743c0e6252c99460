//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "DOOMSDAY_CONFIG";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API base URL.
    pub api_base_url: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Per-probe timeout in seconds (0 disables the timeout).
    pub probe_timeout_secs: Option<u64>,

    /// Catalog API requests per second.
    pub requests_per_second: Option<u32>,

    /// User-Agent sent with every request.
    pub user_agent: Option<String>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("me", "ipsw", "doomsday")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Set a key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_base_url" | "api_url" => self.api_base_url = Some(value.to_string()),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "probe_timeout_secs" | "timeout" => self.probe_timeout_secs = Some(value.parse()?),
            "requests_per_second" | "rps" => {
                let n: u32 = value.parse()?;
                anyhow::ensure!(n > 0, "requests_per_second must be at least 1");
                self.requests_per_second = Some(n);
            }
            "user_agent" => self.user_agent = Some(value.to_string()),
            _ => anyhow::bail!(
                "Unknown config key: {key}\n\n\
                 Available keys:\n  \
                 api_base_url        - Catalog API base URL\n  \
                 output_format       - Default output format (pretty/json/csv/yaml)\n  \
                 probe_timeout_secs  - Per-probe timeout in seconds (0 = none)\n  \
                 requests_per_second - Catalog request throttle\n  \
                 user_agent          - User-Agent header"
            ),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_file() {
        let config: Config = toml::from_str(
            r#"
            probe_timeout_secs = 4
            output_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.probe_timeout_secs, Some(4));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        assert!(config.api_base_url.is_none());
    }

    #[test]
    fn set_known_keys() {
        let mut config = Config::default();
        config.set("timeout", "10").unwrap();
        config.set("output", "yaml").unwrap();
        config.set("api_url", "http://mirror.local/v4").unwrap();
        assert_eq!(config.probe_timeout_secs, Some(10));
        assert_eq!(config.output_format, Some(OutputFormat::Yaml));
        assert_eq!(config.api_base_url.as_deref(), Some("http://mirror.local/v4"));
    }

    #[test]
    fn reject_bad_values() {
        let mut config = Config::default();
        assert!(config.set("rps", "0").is_err());
        assert!(config.set("timeout", "soon").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn roundtrip_through_toml() {
        let mut config = Config::default();
        config.set("rps", "2").unwrap();
        config.set("user_agent", "audit-bot/1.0").unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
