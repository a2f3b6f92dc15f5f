//! Server configuration
//!
//! Loaded from a TOML file (path in `SHARKMAIL_CONFIG`, default
//! `config.toml`); the secrets can be overridden through environment
//! variables so they stay out of the file in deployments.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub providers: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker count; defaults to the CPU count.
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub cloudflare_api_token: String,
    pub resend_api_key: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3001
}

const fn default_token_ttl_hours() -> i64 {
    24 * 7
}

impl AppConfig {
    /// Load configuration from disk, then apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path =
            std::env::var("SHARKMAIL_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let content = std::fs::read_to_string(Path::new(&path))
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let mut config: Self =
            toml::from_str(&content).with_context(|| format!("Invalid config file: {path}"))?;

        if let Ok(url) = std::env::var("SHARKMAIL_DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(secret) = std::env::var("SHARKMAIL_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(token) = std::env::var("CLOUDFLARE_API_TOKEN") {
            config.providers.cloudflare_api_token = token;
        }
        if let Ok(key) = std::env::var("RESEND_API_KEY") {
            config.providers.resend_api_key = key;
        }

        Ok(config)
    }

    /// Listen address for the HTTP server.
    #[must_use]
    pub fn bind_addr(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
