use std::{net::SocketAddr, num::ParseIntError, path::PathBuf};

use core_smx::{MAX_SITEMAP_LENGTH, SITEMAP_MAX_AGE, SitemapOptions};

/// Everything the sitemap server needs from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on (HOST:PORT, default `127.0.0.1:3000`).
    pub addr: SocketAddr,
    /// Base origin the sitemap URLs resolve under (SITEMAP_BASE_URL).
    pub base_url: String,
    /// JSON array of URL entries, re-read on every refresh (SITEMAP_URLS_FILE).
    pub urls_file: PathBuf,
    /// SITEMAP_SIZE and SITEMAP_MAX_AGE_MS.
    pub options: SitemapOptions,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = required(&lookup, "SITEMAP_BASE_URL")?;
        let urls_file = PathBuf::from(required(&lookup, "SITEMAP_URLS_FILE")?);

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = number(&lookup, "PORT", 3000)?;
        if port > u64::from(u16::MAX) {
            return Err(ConfigError::OutOfRange("PORT"));
        }
        let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;

        let size = number(&lookup, "SITEMAP_SIZE", MAX_SITEMAP_LENGTH as u64)?;
        let max_age_ms = number(&lookup, "SITEMAP_MAX_AGE_MS", SITEMAP_MAX_AGE.as_millis() as u64)?;

        let options = SitemapOptions::builder()
            .size(usize::try_from(size).map_err(|_| ConfigError::OutOfRange("SITEMAP_SIZE"))?)
            .max_age_ms(max_age_ms)
            .build();
        options.validate().map_err(|_| ConfigError::OutOfRange("SITEMAP_SIZE"))?;

        Ok(Self {
            addr,
            base_url,
            urls_file,
            options,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn number(lookup: &impl Fn(&str) -> Option<String>, name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidNumber { name, source }),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is required")]
    Missing(&'static str),
    #[error("Environment variable {name} must be a non-negative integer: {source}")]
    InvalidNumber {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("Environment variable {0} is out of range")]
    OutOfRange(&'static str),
    #[error("Invalid HOST:PORT address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[
            ("SITEMAP_BASE_URL", "https://example.com"),
            ("SITEMAP_URLS_FILE", "urls.json"),
        ])
        .unwrap();

        assert_eq!(config.addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.urls_file, PathBuf::from("urls.json"));
        assert_eq!(config.options, SitemapOptions::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SITEMAP_BASE_URL", "https://example.com/docs/"),
            ("SITEMAP_URLS_FILE", "/srv/urls.json"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("SITEMAP_SIZE", "1000"),
            ("SITEMAP_MAX_AGE_MS", "60000"),
        ])
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.options.size, 1000);
        assert_eq!(config.options.max_age, Duration::from_secs(60));
    }

    #[test]
    fn test_missing_required() {
        assert!(matches!(
            config(&[("SITEMAP_URLS_FILE", "urls.json")]),
            Err(ConfigError::Missing("SITEMAP_BASE_URL"))
        ));
        assert!(matches!(
            config(&[("SITEMAP_BASE_URL", "https://example.com"), ("SITEMAP_URLS_FILE", "  ")]),
            Err(ConfigError::Missing("SITEMAP_URLS_FILE"))
        ));
    }

    #[test]
    fn test_invalid_numbers() {
        let base = [("SITEMAP_BASE_URL", "https://example.com"), ("SITEMAP_URLS_FILE", "urls.json")];

        let mut vars = base.to_vec();
        vars.push(("SITEMAP_SIZE", "-5"));
        assert!(matches!(
            config(&vars),
            Err(ConfigError::InvalidNumber { name: "SITEMAP_SIZE", .. })
        ));

        let mut vars = base.to_vec();
        vars.push(("SITEMAP_SIZE", "0"));
        assert!(matches!(config(&vars), Err(ConfigError::OutOfRange("SITEMAP_SIZE"))));

        let mut vars = base.to_vec();
        vars.push(("PORT", "70000"));
        assert!(matches!(config(&vars), Err(ConfigError::OutOfRange("PORT"))));
    }
}
