//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::{CategoryTable, MAX_TTL_SECS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Diagnostics HTTP server port
    pub server_port: u16,
    /// Expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// Category table the store is built from
    pub categories: CategoryTable,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `CACHE_DISABLED` - Comma-separated categories to disable
    /// - `CACHE_TTL_<NAME>` - Default TTL in seconds for category `<NAME>`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_port = lookup("SERVER_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.server_port);

        let sweep_interval = lookup("SWEEP_INTERVAL")
            .and_then(|v| v.parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .unwrap_or(defaults.sweep_interval);

        let mut categories = defaults.categories;

        let names: Vec<String> = categories.iter().map(|(key, _)| key.clone()).collect();
        for name in names {
            let var = format!("CACHE_TTL_{}", name);
            let Some(raw) = lookup(&var) else {
                continue;
            };
            match raw.trim().parse::<u64>() {
                Ok(ttl) if ttl > MAX_TTL_SECS => warn!(
                    "Ignoring {}={:?}: exceeds maximum of {} seconds",
                    var, raw, MAX_TTL_SECS
                ),
                Ok(ttl) => {
                    if let Some(config) = categories.get_mut(&name) {
                        config.default_ttl = Some(ttl);
                    }
                }
                Err(_) => warn!("Ignoring {}={:?}: not a number of seconds", var, raw),
            }
        }

        if let Some(disabled) = lookup("CACHE_DISABLED") {
            for name in disabled.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                match categories.get_mut(name) {
                    Some(config) => config.enabled = false,
                    None => warn!("CACHE_DISABLED names unknown category {:?}", name),
                }
            }
        }

        Self {
            server_port,
            sweep_interval,
            categories,
        }
    }

    /// Sweep interval as a Duration.
    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            sweep_interval: 60,
            categories: CategoryTable::reference(),
        }
    }
}
