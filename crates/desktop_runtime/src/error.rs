//! Error type for the desktop runtime boundary.

use thiserror::Error;

/// Failures surfaced by the runtime.
///
/// Window operations on a valid [`AppId`](crate::model::AppId) never fail; errors only arise
/// where untrusted text enters (ids, scripts, config) or where host services are involved.
#[derive(Debug, Error)]
pub enum DesktopError {
    /// The application id is not part of the fixed window set.
    #[error("unknown application id `{0}`")]
    UnknownApp(String),
    /// A scripted command could not be parsed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    /// A persisted snapshot uses a layout schema this build cannot replay.
    #[error("unsupported desktop snapshot schema version {0}")]
    UnsupportedSnapshot(u32),
    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
    /// A host service failed while executing a runtime effect.
    #[error(transparent)]
    Host(#[from] platform_host::HostError),
}

/// Convenience result alias for runtime APIs.
pub type DesktopResult<T> = Result<T, DesktopError>;
