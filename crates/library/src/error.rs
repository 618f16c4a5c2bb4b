//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! There is no front matter error: a document whose metadata block can't be
//! parsed is treated as having no metadata at all.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No catalog entry has this id. Nothing was fetched.
    #[display("project not found: {_0}")]
    NotFound(#[error(not(source))] String),
    /// The document couldn't be fetched from storage.
    #[display(
        "failed to fetch {}{}",
        path.display(),
        status.map(|code| format!(" (status {code})")).unwrap_or_default()
    )]
    Fetch {
        /// Storage path of the document.
        path: PathBuf,
        /// HTTP-style status, when the failure maps to one.
        status: Option<u16>,
    },
    /// A catalog entry is missing its id or title.
    #[display("invalid project: {_0}")]
    InvalidProject(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch { status: None, .. } => true,
            Self::Fetch { status: Some(code), .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::NotFound("alpha".into()), "project not found: alpha", false)]
    #[case(
        ErrorKind::Fetch { path: "projects/alpha.md".into(), status: Some(404) },
        "failed to fetch projects/alpha.md (status 404)",
        false
    )]
    #[case(
        ErrorKind::Fetch { path: "projects/alpha.md".into(), status: Some(502) },
        "failed to fetch projects/alpha.md (status 502)",
        true
    )]
    #[case(
        ErrorKind::Fetch { path: "projects/alpha.md".into(), status: None },
        "failed to fetch projects/alpha.md",
        true
    )]
    #[case(ErrorKind::InvalidProject("missing title".into()), "invalid project: missing title", false)]
    fn display_and_retry(#[case] kind: ErrorKind, #[case] message: &str, #[case] retryable: bool) {
        assert_eq!(kind.to_string(), message);
        assert_eq!(kind.is_retryable(), retryable);
    }
}
