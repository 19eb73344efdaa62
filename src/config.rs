//! Server configuration from environment variables.

use std::net::SocketAddr;

/// Fixed client re-fetch interval advertised in snapshots.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub poll_interval_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // 8173 is ascii for "QI"
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8173)),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ServerConfig {
    /// Load config from QUIZ_BIND_ADDR and QUIZ_POLL_INTERVAL_MS, keeping
    /// defaults (and warning) on unset or unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("QUIZ_BIND_ADDR") {
            match addr.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => {
                    tracing::warn!("Ignoring invalid QUIZ_BIND_ADDR {:?}: {}", addr, e);
                }
            }
        }

        if let Ok(interval) = std::env::var("QUIZ_POLL_INTERVAL_MS") {
            match interval.parse() {
                Ok(ms) => config.poll_interval_ms = ms,
                Err(e) => {
                    tracing::warn!("Ignoring invalid QUIZ_POLL_INTERVAL_MS {:?}: {}", interval, e);
                }
            }
        }

        config
    }
}
