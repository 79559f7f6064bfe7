use thiserror::Error;

/// Client input was rejected before any store mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name and email are required.")]
    MissingContact,
}

/// Best-effort lead notification failed. Logged only, never surfaced to the
/// HTTP caller.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("message build failed: {0}")]
    Build(String),

    #[error("transport failed: {0}")]
    Transport(String),

    #[error("provider responded with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
