use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5725;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://ToDo.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT '{0}'")]
    Port(String),
    #[error("invalid HOST '{0}'")]
    Host(String),
    #[error("invalid CORS_ALLOWED_ORIGIN '{0}'")]
    Origin(String),
}

/// Cross-origin policy applied to every route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    AllowAny,
    /// Only this origin, with GET, POST, PATCH and DELETE.
    Origin(HeaderValue),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub cors: CorsPolicy,
}

impl Config {
    /// Environment variables:
    /// - `HOST` (default `0.0.0.0`)
    /// - `PORT` (default `5725`)
    /// - `DATABASE_URL` (default `sqlite://ToDo.db`)
    /// - `CORS_ALLOWED_ORIGIN`: unset, empty or `*` allows any origin
    ///
    /// Empty values count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Host(raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Port(raw))?,
            None => DEFAULT_PORT,
        };
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let cors = match lookup("CORS_ALLOWED_ORIGIN") {
            Some(raw) if raw != "*" => {
                let origin = HeaderValue::from_str(&raw).map_err(|_| ConfigError::Origin(raw.clone()))?;
                CorsPolicy::Origin(origin)
            }
            _ => CorsPolicy::AllowAny,
        };
        Ok(Self { host, port, database_url, cors })
    }

    pub fn addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.cors, CorsPolicy::AllowAny);
        assert_eq!(config.addr().to_string(), "0.0.0.0:5725");
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("CORS_ALLOWED_ORIGIN", "https://client.example.com"),
        ])
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.cors, CorsPolicy::Origin(HeaderValue::from_static("https://client.example.com")));
    }

    #[test]
    fn wildcard_origin_allows_any() {
        assert_eq!(load(&[("CORS_ALLOWED_ORIGIN", "*")]).unwrap().cors, CorsPolicy::AllowAny);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = load(&[("HOST", ""), ("PORT", ""), ("DATABASE_URL", ""), ("CORS_ALLOWED_ORIGIN", "")]).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:5725");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.cors, CorsPolicy::AllowAny);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(matches!(load(&[("PORT", "http")]), Err(ConfigError::Port(p)) if p == "http"));
    }
}
