//! Static web server backend.
//!
//! Reads documents with `GET` and checks for them with `HEAD`, relative to a
//! base URL. This is how the documents are served to the browser in the first
//! place, so the same layout works unchanged.

use super::FileInfoStream;
use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::path::{to_url_path, validate as validate_path};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::{Client, StatusCode, Url};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Storage backend over HTTP(S).
///
/// # Examples
///
/// ```no_run
/// use folio_storage::backend::HttpBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("site", "https://example.com/portfolio/")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpBackend {
    name: String,
    base: Url,
    client: Client,
}
impl HttpBackend {
    /// Create a backend rooted at `base_url`. A missing trailing slash is
    /// added, so `https://example.com/site` serves `site/projects/a.md`.
    pub fn new(name: impl Into<String>, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = base_url.as_ref();
        let mut base = Url::parse(base_url)
            .or_raise(|| ErrorKind::BackendError(format!("invalid base URL `{base_url}`")))?;
        if !matches!(base.scheme(), "http" | "https") {
            exn::bail!(ErrorKind::BackendError(format!("unsupported URL scheme `{}`", base.scheme())));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .or_raise(|| ErrorKind::BackendError("failed to build HTTP client".to_string()))?;
        Ok(Self { name: name.into(), base, client })
    }

    fn url(&self, path: &Path) -> Result<Url> {
        let validated = validate_path(path)?;
        // The `./` stops a first segment containing `:` from parsing as a scheme.
        let relative = format!("./{}", to_url_path(&validated));
        self.base
            .join(&relative)
            .or_raise(|| ErrorKind::InvalidPath(path.to_path_buf()))
    }

    fn network_error(err: reqwest::Error) -> ErrorKind {
        ErrorKind::Network(err.to_string())
    }
}

#[async_trait]
impl StorageBackend for HttpBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_stream<'a>(&'a self, _prefix: Option<&'a Path>) -> FileInfoStream<'a> {
        Box::pin(futures::stream::once(async { Err(exn::Exn::from(ErrorKind::Unsupported("list"))) }))
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let url = self.url(path)?;
        let response = self.client.head(url).send().await.map_err(Self::network_error)?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => exn::bail!(ErrorKind::Status {
                path: path.to_path_buf(),
                code: status.as_u16()
            }),
        }
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let url = self.url(path)?;
        tracing::trace!(backend = %self.name, %url, "fetching document");
        let response = self.client.get(url).send().await.map_err(Self::network_error)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status {
                path: path.to_path_buf(),
                code: status.as_u16()
            });
        }
        let body = response.bytes().await.map_err(Self::network_error)?;
        Ok(body.to_vec())
    }
}
