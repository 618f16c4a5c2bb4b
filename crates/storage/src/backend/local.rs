//! Local filesystem storage backend.
//!
//! Documents are read from a configured directory via `tokio::fs`.

use crate::backend::FileInfoStream;
use crate::error::ErrorKind;
use crate::{FileInfo, StorageBackend, error::Result, path::validate as validate_path};
use async_stream::stream;
use async_trait::async_trait;
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tokio::fs::{self, DirEntry};

enum WalkEntry {
    File(FileInfo),
    Descend(PathBuf),
    Skip,
}

/// Local filesystem storage backend.
///
/// All paths are relative to the configured root directory.
///
/// # Examples
///
/// ```no_run
/// use folio_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("site", "/srv/www/portfolio")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend over an existing directory.
    ///
    /// # Errors
    ///
    /// [`InvalidPath`](ErrorKind::InvalidPath) if `root` is relative or not a
    /// directory, [`NotFound`](ErrorKind::NotFound) if it doesn't exist.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if !root.exists() {
            exn::bail!(ErrorKind::NotFound(root));
        }
        if !root.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { name: name.into(), root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn relative_path(&self, absolute: impl AsRef<Path>) -> Result<PathBuf> {
        let absolute = absolute.as_ref();
        let relative = absolute.strip_prefix(&self.root).or_raise(|| {
            ErrorKind::BackendError(format!("path `{}` is not within root `{}`", absolute.display(), self.root.display()))
        })?;
        validate_path(relative)
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }

    // Errors can't be `?`-ed inside the `stream!` loop, so each entry is
    // classified here and the loop only has to yield or push.
    async fn process_entry(&self, entry: DirEntry, prefix: Option<&Path>) -> Result<WalkEntry> {
        let path = entry.path();
        let metadata = entry.metadata().await.map_err(|e| Self::map_io_error(e, &path))?;
        let relative = self.relative_path(&path)?;
        if metadata.is_dir() {
            // Keep descending towards a deeper prefix, but never into a
            // sibling that can't contain it.
            return Ok(match prefix {
                Some(pfx) if !relative.starts_with(pfx) && !pfx.starts_with(&relative) => WalkEntry::Skip,
                _ => WalkEntry::Descend(path),
            });
        }
        if let Some(pfx) = prefix
            && !relative.starts_with(pfx)
        {
            return Ok(WalkEntry::Skip);
        }
        if metadata.is_file() {
            let modified = metadata.modified().map_err(ErrorKind::Io)?;
            return Ok(WalkEntry::File(FileInfo::new(relative, metadata.len(), modified)));
        }
        // Most likely a broken symlink.
        Ok(WalkEntry::Skip)
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_stream<'a>(&'a self, prefix: Option<&'a Path>) -> FileInfoStream<'a> {
        let validated_prefix = match prefix.map(validate_path).transpose() {
            Ok(pfx) => pfx,
            Err(e) => return Box::pin(futures::stream::once(async { Result::Err(e) })),
        };
        let mut stack = vec![self.root.clone()];

        Box::pin(stream! {
            'dirs: while let Some(current) = stack.pop() {
                let mut entries = match fs::read_dir(&current).await {
                    Ok(entries) => entries,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                    Err(err) => {
                        yield Err(exn::Exn::from(Self::map_io_error(err, &current)));
                        continue 'dirs;
                    }
                };
                'entries: loop {
                    let entry = match entries.next_entry().await {
                        Ok(Some(entry)) => entry,
                        Ok(None) => break 'entries,
                        Err(e) => { yield Err(exn::Exn::from(Self::map_io_error(e, &current))); continue 'entries; },
                    };
                    match self.process_entry(entry, validated_prefix.as_deref()).await {
                        Ok(WalkEntry::File(f)) => yield Ok(f),
                        Ok(WalkEntry::Descend(d)) => stack.push(d),
                        Ok(WalkEntry::Skip) => {},
                        Err(e) => yield Err(e),
                    };
                }
            }
        })
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        match fs::metadata(&abs_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => exn::bail!(Self::map_io_error(e, path)),
        }
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        tracing::trace!(backend = %self.name, path = %abs_path.display(), "reading file");
        Ok(fs::read(&abs_path).await.map_err(|e| Self::map_io_error(e, path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn backend_with(files: &[(&str, &str)]) -> (tempfile::TempDir, LocalBackend) {
        let temp_dir = tempfile::tempdir().unwrap();
        for (path, contents) in files {
            let full = temp_dir.path().join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, contents).unwrap();
        }
        let backend = LocalBackend::new("local", temp_dir.path()).unwrap();
        (temp_dir, backend)
    }

    #[test]
    fn test_new_requires_absolute_existing_directory() {
        let (temp_dir, _) = backend_with(&[("file.md", "x")]);
        assert!(LocalBackend::new("name", temp_dir.path()).is_ok());
        assert!(LocalBackend::new("name", "relative/path").is_err());
        let err = LocalBackend::new("name", temp_dir.path().join("missing")).err().unwrap();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        let err = LocalBackend::new("name", temp_dir.path().join("file.md")).err().unwrap();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_root_is_kept() {
        let (temp_dir, backend) = backend_with(&[]);
        assert_eq!(backend.root(), temp_dir.path());
    }

    #[test]
    fn test_absolute_and_relative_paths() {
        let (temp_dir, backend) = backend_with(&[]);
        let expected = temp_dir.path().join("projects/alpha.md");
        assert_eq!(backend.absolute_path("projects/alpha.md").unwrap(), expected);
        assert!(backend.absolute_path("../etc/passwd").is_err());
        assert_eq!(backend.relative_path(&expected).unwrap(), Path::new("projects/alpha.md"));
        assert!(backend.relative_path("/other/file.md").is_err());
    }

    #[tokio::test]
    async fn test_read() {
        let (_dir, backend) = backend_with(&[("projects/alpha.md", "# Alpha")]);
        assert_eq!(backend.read(Path::new("projects/alpha.md")).await.unwrap(), b"# Alpha");
        assert_eq!(backend.read_to_string(Path::new("projects//alpha.md")).await.unwrap(), "# Alpha");
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (_dir, backend) = backend_with(&[]);
        let err = backend.read(Path::new("projects/missing.md")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_read_invalid_utf8_is_lossy() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("bad.md"), b"ok \xFF ok").unwrap();
        let backend = LocalBackend::new("local", temp_dir.path()).unwrap();
        assert_eq!(backend.read_to_string(Path::new("bad.md")).await.unwrap(), "ok \u{FFFD} ok");
    }

    #[tokio::test]
    async fn test_exists() {
        let (_dir, backend) = backend_with(&[("projects/alpha.md", "a")]);
        assert!(backend.exists(Path::new("projects/alpha.md")).await.unwrap());
        assert!(!backend.exists(Path::new("projects/beta.md")).await.unwrap());
        // Directories are not documents.
        assert!(!backend.exists(Path::new("projects")).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all_and_prefixed() {
        let (_dir, backend) = backend_with(&[
            ("projects/alpha.md", "a"),
            ("projects/beta.md", "b"),
            ("projects-old/gamma.md", "c"),
            ("index.md", "d"),
        ]);
        assert_eq!(backend.list(None).await.unwrap().len(), 4);
        let mut paths = backend
            .list(Some(Path::new("projects/")))
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.path)
            .collect::<Vec<_>>();
        paths.sort();
        assert_eq!(paths, vec![PathBuf::from("projects/alpha.md"), PathBuf::from("projects/beta.md")]);
    }

    #[tokio::test]
    async fn test_list_nonexistent_prefix() {
        let (_dir, backend) = backend_with(&[("projects/alpha.md", "a")]);
        assert!(backend.list(Some(Path::new("nonexistent/"))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_path_security() {
        let (_dir, backend) = backend_with(&[]);
        assert!(backend.read(Path::new("../etc/passwd")).await.is_err());
        assert!(backend.read(Path::new("projects/../../passwd")).await.is_err());
        assert!(backend.exists(Path::new("../../file")).await.is_err());
    }
}
