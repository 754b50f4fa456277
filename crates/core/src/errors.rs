use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuildError {
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("Platform mutation failed: {0}")]
    Mutation(#[from] MutationFailure),

    #[error("External service failure: {0}")]
    ExternalService(String),

    #[error("Image download failed: {0}")]
    DownloadFailure(String),

    #[error("Image processing error: {0}")]
    Image(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] eyre::Report),
}

pub type GuildResult<T> = Result<T, GuildError>;

/// Broad classification of a rejected platform call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    PermissionDenied,
    NotFound,
    RateLimited,
    Other,
}

impl FailureKind {
    /// Classify from the HTTP status the platform answered with.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => FailureKind::PermissionDenied,
            404 => FailureKind::NotFound,
            429 => FailureKind::RateLimited,
            _ => FailureKind::Other,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::PermissionDenied => "permission denied",
            FailureKind::NotFound => "not found",
            FailureKind::RateLimited => "rate limited",
            FailureKind::Other => "request failed",
        };
        f.write_str(label)
    }
}

/// A single platform call that was rejected.
///
/// Executors record these per item instead of propagating them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct MutationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl MutationFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Other, message)
    }
}

pub type MutationResult<T> = Result<T, MutationFailure>;
