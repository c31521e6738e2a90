//! Server configuration and startup errors.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use crate::network::NetworkError;

/// Environment variable naming the network JSON file.
pub const NETWORK_VAR: &str = "METRO_NETWORK";

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "METRO_ADDR";

const DEFAULT_NETWORK: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_network.json");
const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    3000,
);

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid METRO_ADDR value {value:?}: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where to find the network and where to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub network_path: PathBuf,
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let network_path = get(NETWORK_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NETWORK));

        let addr = match get(ADDR_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ServerError::InvalidAddr { value, source })?,
            None => DEFAULT_ADDR,
        };

        Ok(Self { network_path, addr })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network_path: PathBuf::from(DEFAULT_NETWORK),
            addr: DEFAULT_ADDR,
        }
    }
}
