//! Error types for the service collaborators.
//!
//! The aggregation core has no error conditions of its own. Everything here
//! belongs to the edges: loading the dataset, binding the listener and
//! decoding request bodies.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The source could not be read.
    #[error("Read error for {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was read but is not a valid list of observations.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that stop the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be parsed.
    #[error("Invalid listen address '{addr}': {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Binding the listener failed.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The configured CORS origin is not a valid header value.
    #[error("Invalid CORS origin: {0:?}")]
    Cors(String),

    /// Accepting a connection failed.
    #[error("Accept failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that reject a request before it reaches the aggregator.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request body could not be read.
    #[error("Failed to read request body: {0}")]
    Body(String),

    /// The request body is not a valid latency request.
    #[error("Invalid request body: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_path() {
        let err = DatasetError::Read {
            path: PathBuf::from("/data/latency.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Read error"));
        assert!(msg.contains("/data/latency.json"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let err: DatasetError = serde_json::from_str::<Vec<u8>>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("Parse error"));
    }
}
