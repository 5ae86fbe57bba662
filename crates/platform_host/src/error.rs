//! Error type shared by host services.

use thiserror::Error;

/// Failures surfaced by host services.
#[derive(Debug, Error)]
pub enum HostError {
    /// Reading or writing the backing medium failed.
    #[error("host i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// A stored value could not be encoded or decoded as JSON.
    #[error("stored value is not valid json: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The service is not available on this host.
    #[error("host service unavailable: {0}")]
    Unavailable(String),
}
