use anyhow::{Context, Result};
use playlist_length::{engine::CalculatorConfig, extractor::ProxyConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;

const APP_NAME: &str = "plen";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// YouTube Data API key, used when neither --api-key nor YOUTUBE_API_KEY is set
    pub api_key: Option<String>,

    /// Default output format
    pub default_output_format: OutputFormat,

    /// Default request timeout in seconds
    pub default_timeout: u64,

    /// Maximum number of duration lookups in flight
    pub concurrency: usize,

    /// Items requested per playlist page (capped at 50)
    pub page_size: u32,

    /// Enable colored output
    pub colored_output: bool,

    /// User agent string for requests
    pub user_agent: Option<String>,

    /// Default proxy URL (supports http, https, socks5)
    pub default_proxy: Option<String>,

    /// Default proxy username (if proxy requires authentication)
    pub default_proxy_username: Option<String>,

    /// Default proxy password (if proxy requires authentication)
    pub default_proxy_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let calculator = CalculatorConfig::default();
        Self {
            api_key: None,
            default_output_format: OutputFormat::Pretty,
            default_timeout: 30,
            concurrency: calculator.concurrency,
            page_size: calculator.page_size,
            colored_output: true,
            user_agent: None,
            default_proxy: None,
            default_proxy_username: None,
            default_proxy_password: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file, falling back to the confy location
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                if path.exists() {
                    let content = std::fs::read_to_string(path)
                        .context("Failed to read configuration file")?;
                    toml::from_str(&content).context("Failed to parse configuration file")
                } else {
                    Ok(Self::default())
                }
            }
            None => confy::load(APP_NAME, None).context("Failed to load configuration"),
        }
    }

    /// Get default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, None).ok()
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, toml_string).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Reset configuration to defaults and save
    pub fn reset(config_path: Option<&Path>) -> Result<()> {
        let path = config_path
            .map(|p| p.to_path_buf())
            .or_else(Self::default_config_path)
            .context("No configuration path available")?;

        Self::default().save(&path)
    }

    /// Show current configuration as a formatted string
    pub fn show(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration for display")
    }

    /// Calculator settings, with an optional concurrency override from the command line
    pub fn calculator_config(&self, concurrency: Option<usize>) -> CalculatorConfig {
        CalculatorConfig {
            page_size: self.page_size,
            concurrency: concurrency.unwrap_or(self.concurrency).max(1),
        }
    }

    /// Proxy settings from the command line, or from the configuration when no proxy URL was given
    pub fn proxy_config(
        &self,
        url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Option<ProxyConfig> {
        match url {
            Some(url) => Some(ProxyConfig {
                url,
                username,
                password,
            }),
            None => self.default_proxy.as_ref().map(|url| ProxyConfig {
                url: url.clone(),
                username: username.or_else(|| self.default_proxy_username.clone()),
                password: password.or_else(|| self.default_proxy_password.clone()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("plen.toml");

        let config = AppConfig {
            api_key: Some("secret".into()),
            default_output_format: OutputFormat::JsonCompact,
            concurrency: 8,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.default_output_format, OutputFormat::JsonCompact);
        assert_eq!(loaded.concurrency, 8);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded.default_timeout, 30);
        assert_eq!(loaded.page_size, 50);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plen.toml");
        std::fs::write(&path, "default_output_format = \"table\"\n").unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.default_output_format, OutputFormat::Table);
        assert!(loaded.colored_output);
    }

    #[test]
    fn test_reset_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plen.toml");
        std::fs::write(&path, "concurrency = 16\n").unwrap();

        AppConfig::reset(Some(&path)).unwrap();
        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.concurrency, AppConfig::default().concurrency);
    }

    #[test]
    fn test_cli_proxy_overrides_config() {
        let config = AppConfig {
            default_proxy: Some("http://config:8080".into()),
            default_proxy_username: Some("user".into()),
            ..AppConfig::default()
        };

        let from_cli = config
            .proxy_config(Some("socks5://cli:1080".into()), None, None)
            .unwrap();
        assert_eq!(from_cli.url, "socks5://cli:1080");
        assert_eq!(from_cli.username, None);

        let from_config = config.proxy_config(None, None, None).unwrap();
        assert_eq!(from_config.url, "http://config:8080");
        assert_eq!(from_config.username.as_deref(), Some("user"));

        assert!(AppConfig::default().proxy_config(None, None, None).is_none());
    }

    #[test]
    fn test_concurrency_override() {
        let config = AppConfig::default();
        assert_eq!(config.calculator_config(Some(0)).concurrency, 1);
        assert_eq!(config.calculator_config(None).concurrency, config.concurrency);
    }
}
