use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://todo.db".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "todo-api".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "todo-api-users".into()),
            ttl_minutes: parse_ttl_minutes(
                std::env::var("JWT_TTL_MINUTES").ok().as_deref(),
            )?,
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8000);
        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());
        Ok(Self {
            database_url,
            host,
            port,
            static_dir,
            jwt,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

/// Longest access token lifetime accepted from configuration (one year).
const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

/// `JWT_TTL_MINUTES`: 30 when unset, otherwise 1..=one year.
fn parse_ttl_minutes(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(30);
    };
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("JWT_TTL_MINUTES is not an integer: {raw}"))?;
    anyhow::ensure!(
        (1..=MAX_TTL_MINUTES).contains(&minutes),
        "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str, port: u16) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            host: host.into(),
            port,
            static_dir: "static".into(),
            jwt: JwtConfig {
                secret: "s".into(),
                issuer: "i".into(),
                audience: "a".into(),
                ttl_minutes: 30,
            },
        }
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let addr = config("127.0.0.1", 8000).bind_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8000");
    }

    #[test]
    fn bind_addr_rejects_hostname() {
        assert!(config("not a host", 80).bind_addr().is_err());
    }

    #[test]
    fn ttl_defaults_to_thirty_minutes() {
        assert_eq!(parse_ttl_minutes(None).unwrap(), 30);
        assert_eq!(parse_ttl_minutes(Some(" 15 ")).unwrap(), 15);
    }

    #[test]
    fn ttl_out_of_range_is_rejected() {
        assert!(parse_ttl_minutes(Some("0")).is_err());
        assert!(parse_ttl_minutes(Some("-5")).is_err());
        assert!(parse_ttl_minutes(Some("1000000000000")).is_err());
        assert!(parse_ttl_minutes(Some("thirty")).is_err());
        assert_eq!(parse_ttl_minutes(Some("525600")).unwrap(), MAX_TTL_MINUTES);
    }
}
