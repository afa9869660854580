use dotenv::dotenv;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

use crate::client::DEFAULT_API_BASE_URL;
use crate::services::sessions::{SessionLimits, DEFAULT_IDLE_TTL_SECS, DEFAULT_MAX_OPEN_FORMS};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Service settings, read from the environment (and `.env` if present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: SocketAddr,
    pub is_production: bool,
    pub max_concurrent_requests: usize,
    pub session_limits: SessionLimits,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("MEDBANKR_API_BASE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_value.clone(),
        })?;

        let is_production = lookup("ENVIRONMENT")
            .map(|val| val.to_lowercase() == "production")
            .unwrap_or(false);

        let max_concurrent_requests = positive(
            &lookup,
            "MAX_CONCURRENT_REQUESTS",
            DEFAULT_MAX_CONCURRENT_REQUESTS as u64,
        )? as usize;

        let idle_ttl_secs = positive(&lookup, "SESSION_IDLE_TTL_SECS", DEFAULT_IDLE_TTL_SECS as u64)?;
        let max_open = positive(&lookup, "MAX_OPEN_FORMS", DEFAULT_MAX_OPEN_FORMS as u64)? as usize;
        let session_limits = SessionLimits {
            idle_ttl: chrono::Duration::seconds(idle_ttl_secs.min(i64::MAX as u64 / 1000) as i64),
            max_open,
        };

        Ok(Self {
            api_base_url,
            bind_addr,
            is_production,
            max_concurrent_requests,
            session_limits,
        })
    }
}

// A variable holding a number greater than zero, or `default` when unset
fn positive<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|number| *number > 0)
            .ok_or(ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
