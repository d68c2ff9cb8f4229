use std::io;
use thiserror::Error;

/// Error type for AnnoQ query construction and dispatch.
#[derive(Error, Debug)]
pub enum AnnoqError {
    /// Caller input rejected before any network traffic.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A field-selection string that is neither inline JSON nor a readable file.
    #[error("field selection `{0}` is neither inline JSON nor an existing file")]
    FileNotFound(String),

    /// Non-success HTTP status from the backend, body carried verbatim.
    #[error("backend returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// Success status but the body breaks the response contract, e.g. the
    /// expected results container is absent.
    #[error("response missing expected `{key}`: {body}")]
    Protocol { key: String, body: String },

    /// Connection-level failure: DNS, connect, TLS, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// IO error occurred while reading a field-selection file or a response body.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Caller-supplied JSON that does not parse.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for AnnoQ operations.
pub type Result<T> = std::result::Result<T, AnnoqError>;
