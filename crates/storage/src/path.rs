//! Document path validation.
//!
//! Every backend resolves paths relative to its own root (a directory, or a
//! base URL). Paths are normalized here once so that no backend can be asked
//! for something outside that root.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Normalizes a storage path and rejects anything that would leave the root.
///
/// `.` components, repeated and trailing slashes, and a leading `/` are
/// dropped. `..` is resolved against earlier components and rejected once it
/// would climb above the root. Null bytes, Windows prefixes and paths that
/// normalize to nothing are [`InvalidPath`](crate::error::ErrorKind::InvalidPath).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use folio_storage::validate_path;
///
/// assert_eq!(validate_path("projects//alpha.md").unwrap(), Path::new("projects/alpha.md"));
/// assert_eq!(validate_path("/projects/./alpha.md").unwrap(), Path::new("projects/alpha.md"));
/// assert!(validate_path("projects/../../secrets").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(original.to_path_buf());
    let mut components = Vec::new();
    for component in original.components() {
        match component {
            Component::Normal(segment) => {
                // `components()` lets null bytes through on Unix.
                if segment.as_encoded_bytes().contains(&0) {
                    exn::bail!(invalid());
                }
                components.push(segment);
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if components.is_empty() {
        exn::bail!(invalid());
    }
    Ok(components.into_iter().collect())
}

/// Renders a validated path with `/` separators, for use in URLs.
pub(crate) fn to_url_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
