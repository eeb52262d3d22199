//! Server configuration from environment variables

use anyhow::Context;
use bbs::BbsConfig;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// In-memory storage when absent
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub bbs: BbsConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let defaults = BbsConfig::default();
        let default_limit = parse_limit(&lookup, "BBS_DEFAULT_PAGE_LIMIT", defaults.default_limit)?;
        let max_limit = parse_limit(&lookup, "BBS_MAX_PAGE_LIMIT", defaults.max_limit)?;

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            bbs: BbsConfig::new(default_limit, max_limit),
        })
    }
}

fn parse_limit(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u32,
) -> anyhow::Result<u32> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a positive integer")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_of(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_of(&[]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr, "0.0.0.0:31113".parse().unwrap());
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.bbs, BbsConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_of(&[
            ("DATABASE_URL", "postgres://localhost/bbs"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
            ("BBS_DEFAULT_PAGE_LIMIT", "20"),
            ("BBS_MAX_PAGE_LIMIT", "50"),
        ])
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/bbs"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.frontend_origins,
            ["https://a.example", "https://b.example"]
        );
        assert_eq!(config.bbs, BbsConfig::new(20, 50));
    }

    #[test]
    fn test_blank_database_url_means_memory() {
        let config = config_of(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config_of(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(config_of(&[("BBS_MAX_PAGE_LIMIT", "-1")]).is_err());
    }
}
