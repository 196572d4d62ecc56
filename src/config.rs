use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "2565".to_string()).parse().context("PORT")?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://moviedb.db?mode=rwc".to_string());

        let request_timeout_secs: u64 =
            var("REQUEST_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(30);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            request_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:2565".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, "sqlite://moviedb.db?mode=rwc");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn bad_port_is_fatal() {
        let err = load(&[("PORT", "abc")]).unwrap_err();
        assert_eq!(err.to_string(), "PORT");
        assert!(load(&[("HOST", "not a host")]).is_err());
    }

    #[test]
    fn bad_timeout_falls_back() {
        let config = load(&[("REQUEST_TIMEOUT_SECS", "soon")]).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
    }
}
