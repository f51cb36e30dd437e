// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{feed::DEFAULT_RESYNC_PERIOD_SECS, DEFAULT_EXPOSER};
use crate::error::{ExposeError, Result};
use std::env;
use std::time::Duration;

/// Controller configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Exposure strategy to use (`ingress`, `loadbalancer` or `nodeport`)
    pub exposer: String,
    /// Domain suffix for generated hostnames
    pub domain: Option<String>,
    /// Namespace to watch, all namespaces when unset
    pub namespace: Option<String>,
    pub resync_period: Duration,
    /// Node address advertised in NodePort URLs
    pub node_ip: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let exposer = non_empty("EXPOSER")
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_EXPOSER.to_string());

        let resync_secs = match non_empty("RESYNC_PERIOD_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ExposeError::ConfigError(format!("RESYNC_PERIOD_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_RESYNC_PERIOD_SECS,
        };
        if resync_secs == 0 {
            return Err(ExposeError::ConfigError(
                "RESYNC_PERIOD_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            exposer,
            domain: non_empty("DOMAIN"),
            namespace: non_empty("WATCH_NAMESPACE"),
            resync_period: Duration::from_secs(resync_secs),
            node_ip: non_empty("NODE_IP"),
        })
    }
}
