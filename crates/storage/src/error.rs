//! Storage Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Callers above the storage layer
//! mostly care about one thing: the HTTP-style status a failure maps to, see
//! [`ErrorKind::status`].

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A storage error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Document does not exist
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied (permissions or credentials)
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// The request never got a response (DNS, TLS, connection reset, timeout)
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// The server answered, but not with success
    #[display("unexpected status {code} for {}", path.display())]
    Status {
        /// The requested path, relative to the backend root.
        path: PathBuf,
        /// The response status code.
        code: u16,
    },
    /// Path contains invalid characters or escapes root
    #[display("invalid path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// The backend can't perform this operation at all
    #[display("operation not supported by this backend: {_0}")]
    Unsupported(#[error(not(source))] &'static str),
    /// Backend-specific error
    #[display("backend error: {_0}")]
    BackendError(#[error(not(source))] String),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Io(_) | Self::Network(_) | Self::BackendError(_) => true,
            Self::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    /// The HTTP-style status code this failure corresponds to, if any.
    ///
    /// Local failures are mapped onto the codes a web server would have
    /// answered with, so callers can report one shape of error regardless
    /// of backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::PermissionDenied(_) => Some(403),
            Self::InvalidPath(_) => Some(400),
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
