//! Runtime configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ORDERS_CHANNEL_CAPACITY` - Request queue length per actor (default: 32)
//! - `ORDERS_STORE_TIMEOUT_MS` - Upper bound on one store request (default: 5000)
//! - `ORDERS_CACHE_ENABLED` - Cache order views in memory (default: true)
//! - `ORDERS_CACHE_CAPACITY` - Maximum cached views (default: 10000)
//! - `ORDERS_RESTOCK_ON_CANCEL` - Return stock when an order is cancelled (default: false)
//! - `ORDERS_AUDIT_CAPACITY` - Buffered status changes per subscriber (default: 64)

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Order system configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    /// Capacity of each actor's request channel
    pub channel_capacity: usize,
    /// Timeout applied to every store request
    pub store_timeout: Duration,
    /// Whether order views are cached
    pub cache_enabled: bool,
    /// Maximum number of cached order views
    pub cache_capacity: u64,
    /// Whether cancelling an order returns its stock to the catalog
    pub restock_on_cancel: bool,
    /// Capacity of the status-change broadcast channel
    pub audit_capacity: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            store_timeout: Duration::from_millis(5000),
            cache_enabled: true,
            cache_capacity: 10_000,
            restock_on_cancel: false,
            audit_capacity: 64,
        }
    }
}

impl WorkflowConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let channel_capacity = parse_or(&lookup, "ORDERS_CHANNEL_CAPACITY", defaults.channel_capacity)?;
        if channel_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ORDERS_CHANNEL_CAPACITY".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let audit_capacity = parse_or(&lookup, "ORDERS_AUDIT_CAPACITY", defaults.audit_capacity)?;
        if audit_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ORDERS_AUDIT_CAPACITY".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let timeout_ms = parse_or(&lookup, "ORDERS_STORE_TIMEOUT_MS", 5000u64)?;

        Ok(Self {
            channel_capacity,
            store_timeout: Duration::from_millis(timeout_ms),
            cache_enabled: parse_or(&lookup, "ORDERS_CACHE_ENABLED", defaults.cache_enabled)?,
            cache_capacity: parse_or(&lookup, "ORDERS_CACHE_CAPACITY", defaults.cache_capacity)?,
            restock_on_cancel: parse_or(&lookup, "ORDERS_RESTOCK_ON_CANCEL", defaults.restock_on_cancel)?,
            audit_capacity,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = WorkflowConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, WorkflowConfig::default());
        assert!(!config.restock_on_cancel);
        assert_eq!(config.store_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = WorkflowConfig::from_lookup(lookup(&[
            ("ORDERS_CHANNEL_CAPACITY", "8"),
            ("ORDERS_STORE_TIMEOUT_MS", "250"),
            ("ORDERS_CACHE_ENABLED", "false"),
            ("ORDERS_RESTOCK_ON_CANCEL", " true "),
        ]))
        .unwrap();
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.store_timeout, Duration::from_millis(250));
        assert!(!config.cache_enabled);
        assert!(config.restock_on_cancel);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = WorkflowConfig::from_lookup(lookup(&[("ORDERS_CACHE_CAPACITY", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORDERS_CACHE_CAPACITY"));

        let err = WorkflowConfig::from_lookup(lookup(&[("ORDERS_CHANNEL_CAPACITY", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORDERS_CHANNEL_CAPACITY"));
    }
}
