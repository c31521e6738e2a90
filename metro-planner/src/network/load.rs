//! Loading networks from JSON.

use std::path::Path;

use tracing::info;

use super::{Network, NetworkConfig, NetworkError};

impl Network {
    /// Parses and validates a network from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    /// Reads a network from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let network = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            lines = network.lines().len(),
            stations = network.station_count(),
            "Loaded network"
        );
        Ok(network)
    }
}
