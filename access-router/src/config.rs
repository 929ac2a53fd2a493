//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Environment variable holding the network file path.
pub const NETWORK_VAR: &str = "ACCESS_ROUTER_NETWORK";

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "ACCESS_ROUTER_ADDR";

/// Errors from reading server configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable could not be parsed
    #[error("invalid {var} {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the routing server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// JSON network document to load at startup.
    pub network_path: PathBuf,

    /// Address to listen on.
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Create a configuration for the given network file and default address.
    pub fn new(network_path: impl Into<PathBuf>) -> Self {
        Self {
            network_path: network_path.into(),
            ..Self::default()
        }
    }

    /// Set the listen address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let network_path = lookup(NETWORK_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(NETWORK_VAR))?;

        let mut config = Self::new(network_path);
        if let Some(value) = lookup(ADDR_VAR) {
            config.addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: ADDR_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network_path: PathBuf::from("network.json"),
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
        }
    }
}
