//! Network loading errors.

/// Errors that can occur when loading a network description.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The network file could not be read
    #[error("failed to read network file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid network JSON
    #[error("network JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop other than the last has a missing, negative or non-finite travel time
    #[error("line {line}: invalid travel time after station {station}")]
    InvalidTravelTime { line: String, station: String },
}
