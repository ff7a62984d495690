use thiserror::Error;

/// Failures known to the synchronizer.
///
/// Only `RegionNotMounted` and `InvalidConfig` are returned to callers as
/// hard errors. The platform conditions are handled inside the player and
/// surface as log lines plus a readiness flag that stays false.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SyncError {
    #[error("media never became seekable: {0}")]
    PlaybackUnavailable(String),
    #[error("platform refused to prime media playback: {0}")]
    ActivationDenied(String),
    #[error("seek to {position:.3}s was rejected")]
    SeekRejected { position: f64 },
    #[error("tracking region is not mounted")]
    RegionNotMounted,
    #[error("invalid sync configuration: {0}")]
    InvalidConfig(String),
    #[error("host environment error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
