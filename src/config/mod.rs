//! Configuration for the lookup service

mod http;
mod logging;
mod sources;

pub use http::HttpConfig;
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use sources::{NoiseConfig, SiteConfig, SourcesConfig, DEFAULT_NOISE_TERMS};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use url::Url;

/// Desktop browser user agent sent with every outbound request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP endpoint configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Outbound source configuration
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Noise filter configuration
    #[serde(default)]
    pub noise: NoiseConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Render this configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate all configuration fields.
    ///
    /// Collects all validation errors and reports them together.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.sources.timeout_secs == 0 {
            errors.push("sources.timeout_secs must be positive".to_string());
        }
        if self.sources.connect_timeout_secs == 0 {
            errors.push("sources.connect_timeout_secs must be positive".to_string());
        }
        if self.sources.max_body_bytes == 0 {
            errors.push("sources.max_body_bytes must be positive".to_string());
        }
        if self.sources.user_agent.trim().is_empty() {
            errors.push("sources.user_agent must not be empty".to_string());
        }

        let sites = self.sources.sites();
        if !sites.iter().any(|(_, site)| site.enabled) {
            errors.push("at least one source must be enabled".to_string());
        }
        for (name, site) in sites {
            if !site.enabled {
                continue;
            }
            if let Some(base_url) = &site.base_url {
                match Url::parse(base_url) {
                    Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
                    Ok(url) => errors.push(format!(
                        "sources.{}.base_url must use http or https, got '{}'",
                        name,
                        url.scheme()
                    )),
                    Err(e) => errors.push(format!(
                        "sources.{}.base_url is not a valid URL: {}",
                        name, e
                    )),
                }
            }
            if site.max_items == Some(0) {
                errors.push(format!("sources.{}.max_items must be positive", name));
            }
        }

        if self.noise.min_length == 0 {
            errors.push("noise.min_length must be positive".to_string());
        }
        if self.noise.numeric_min_length < self.noise.min_length {
            errors.push(format!(
                "noise.numeric_min_length ({}) must be >= noise.min_length ({})",
                self.noise.numeric_min_length, self.noise.min_length
            ));
        }
        if self.noise.terms.iter().any(|t| t.trim().is_empty()) {
            errors.push("noise.terms must not contain empty terms".to_string());
        }

        if self.http.listen_addr.parse::<SocketAddr>().is_err() {
            errors.push(format!(
                "http.listen_addr '{}' is not a valid socket address",
                self.http.listen_addr
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
