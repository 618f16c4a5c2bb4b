//! Storage backend trait and implementations.
//!
//! Documents are only ever read: the site owner ships them, this crate
//! fetches them. Backends exist for a local directory, for a static web
//! server (feature `http`) and for tests (feature `mock`).

#[cfg(feature = "http")]
mod http;
mod local;
#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "http")]
pub use self::http::HttpBackend;
pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
use crate::FileInfo;
use crate::error::Result;
use async_trait::async_trait;
use futures::{Stream, TryStreamExt};
use std::path::Path;
use std::pin::Pin;

type FileInfoStream<'a> = Pin<Box<dyn Stream<Item = Result<FileInfo>> + Send + 'a>>;

/// Unified, read-only interface over wherever documents live.
///
/// # Path Handling
/// All paths are relative to the backend root and are validated with
/// [`validate_path`](crate::validate_path) before use. Implementations
/// enforce this themselves.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use folio_storage::{backend::StorageBackend, error::Result};
///
/// async fn first_line(backend: &dyn StorageBackend) -> Result<Option<String>> {
///     let path = Path::new("projects/alpha.md");
///     if !backend.exists(path).await? {
///         return Ok(None);
///     }
///     let text = backend.read_to_string(path).await?;
///     Ok(text.lines().next().map(str::to_string))
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Name of the configured backend, used for logging only.
    fn name(&self) -> &str;

    /// List all files under an optional prefix.
    ///
    /// Default implementation collects [`list_stream()`](Self::list_stream)
    /// into a [`Vec`].
    async fn list(&self, prefix: Option<&Path>) -> Result<Vec<FileInfo>> {
        self.list_stream(prefix).try_collect().await
    }

    /// Stream metadata of all files under an optional prefix.
    ///
    /// Not every backend can enumerate its contents; those yield a single
    /// [`Unsupported`](crate::error::ErrorKind::Unsupported) error.
    fn list_stream<'a>(&'a self, prefix: Option<&'a Path>) -> FileInfoStream<'a>;

    /// Check if a file exists.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Read file contents.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Read file contents as text. Invalid UTF-8 sequences are replaced with
    /// U+FFFD rather than failing the read.
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.read(path).await?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }
}
