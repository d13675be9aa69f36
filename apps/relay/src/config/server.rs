//! Listener and heartbeat settings, read once at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `RELAY_HOST` | `0.0.0.0` |
//! | `RELAY_PORT` | `8080` |
//! | `RELAY_HEARTBEAT_SECS` | `20` |
//! | `RELAY_CLIENT_TIMEOUT_SECS` | `40` |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How often the server pings each connection.
    pub heartbeat_interval: Duration,
    /// Silence after which a connection is dropped.
    pub client_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            heartbeat_interval: Duration::from_secs(20),
            client_timeout: Duration::from_secs(40),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let host = value("RELAY_HOST").unwrap_or(defaults.host);
        let port = parse_or(value("RELAY_PORT"), "RELAY_PORT", defaults.port)?;
        let heartbeat_secs = parse_or(
            value("RELAY_HEARTBEAT_SECS"),
            "RELAY_HEARTBEAT_SECS",
            defaults.heartbeat_interval.as_secs(),
        )?;
        let timeout_secs = parse_or(
            value("RELAY_CLIENT_TIMEOUT_SECS"),
            "RELAY_CLIENT_TIMEOUT_SECS",
            defaults.client_timeout.as_secs(),
        )?;

        if heartbeat_secs == 0 {
            return Err(AppError::config("RELAY_HEARTBEAT_SECS must be positive"));
        }
        if timeout_secs <= heartbeat_secs {
            return Err(AppError::config(format!(
                "RELAY_CLIENT_TIMEOUT_SECS ({timeout_secs}) must exceed RELAY_HEARTBEAT_SECS ({heartbeat_secs})"
            )));
        }

        Ok(Self {
            host,
            port,
            heartbeat_interval: Duration::from_secs(heartbeat_secs),
            client_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T>(raw: Option<String>, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|err| AppError::config(format!("{name}={raw:?} is invalid: {err}"))),
    }
}
