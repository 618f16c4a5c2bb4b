use crate::catalog::{Catalog, CatalogEntry, metadata_defaults};
use crate::error::{ErrorKind, Result};
use crate::path::document_path;
use crate::scan::{ScanEvent, scan};
use folio_cache::DocumentCache;
use folio_config::ProjectsConfig;
use folio_extract::extract_front_matter;
use folio_extract::models::DocumentMetadata;
use folio_storage::BackendHandle;
use futures::StreamExt;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

/// A rendered project, ready to be inserted into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProject {
    pub title: String,
    /// The rendered body wrapped in the configured container element.
    pub content: Arc<str>,
}

/// What [`Loader::refresh_catalog`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Auto-loading is turned off; the catalog was left alone.
    Disabled,
    /// No documents were found. `projects` is the size of the catalog now in
    /// place.
    Fallback { projects: usize },
    Scanned { loaded: usize, skipped: usize },
}

/// Fetches, renders and caches the documents of a catalog.
///
/// The loader owns its cache: two loaders never share fetched text or
/// rendered output.
pub struct Loader {
    backend: BackendHandle,
    settings: ProjectsConfig,
    catalog: RwLock<Catalog>,
    cache: DocumentCache,
}

impl Loader {
    /// Starts out with the configured fallback projects as the catalog.
    pub fn new(backend: BackendHandle, settings: ProjectsConfig) -> Self {
        let catalog = Catalog::from_config(&settings);
        Self::with_catalog(backend, settings, catalog)
    }

    pub fn with_catalog(backend: BackendHandle, settings: ProjectsConfig, catalog: Catalog) -> Self {
        Self {
            backend,
            settings,
            catalog: RwLock::new(catalog),
            cache: DocumentCache::new(),
        }
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// A copy of the current catalog.
    pub async fn catalog(&self) -> Catalog {
        self.catalog.read().await.clone()
    }

    pub async fn add_project(&self, entry: CatalogEntry) -> Result<()> {
        self.catalog.write().await.add(entry)
    }

    /// Renders the project `id` and returns it with its title.
    ///
    /// Rendered output is cached per id, and fetched text per path, so
    /// neither is produced twice. Unknown ids fail before anything is
    /// fetched.
    #[instrument(skip(self))]
    pub async fn load_project(&self, id: &str) -> Result<LoadedProject> {
        let entry = {
            let catalog = self.catalog.read().await;
            catalog.get(id).cloned()
        };
        let Some(entry) = entry else {
            exn::bail!(ErrorKind::NotFound(id.to_string()));
        };
        if let Some(content) = self.cache.rendered(id).await {
            return Ok(LoadedProject { title: entry.title, content });
        }

        let body = match &entry.raw_body {
            Some(body) => Cow::Borrowed(&**body),
            None => {
                let filename = format!("{id}{}", self.settings.extension);
                let text = self.fetch(&document_path(&self.settings.base_path, &filename)).await?;
                Cow::Owned(extract_front_matter(&text).content)
            },
        };
        let html = self.wrap(&folio_markup::render(&body));
        let content = self.cache.store_rendered(id, html).await;
        tracing::debug!(id, size = content.len(), "rendered project");
        Ok(LoadedProject { title: entry.title, content })
    }

    /// Reads a document as text, at most once per path.
    #[instrument(skip(self))]
    pub async fn fetch(&self, path: &str) -> Result<Arc<str>> {
        let path = PathBuf::from(path);
        if let Some(text) = self.cache.raw(&path).await {
            return Ok(text);
        }
        let text = self.backend.read_to_string(&path).await.map_err(|err| {
            let status = err.status();
            err.raise(ErrorKind::Fetch { path: path.clone(), status })
        })?;
        Ok(self.cache.store_raw(path, text).await)
    }

    /// Fetches `filename` under the base path and turns it into a catalog
    /// entry carrying its body.
    pub(crate) async fn scan_file(&self, filename: &str) -> Result<CatalogEntry> {
        let filename = filename.strip_prefix('/').unwrap_or(filename);
        let text = self.fetch(&document_path(&self.settings.base_path, filename)).await?;
        let split = extract_front_matter(&text);
        let metadata = DocumentMetadata::derive(
            &split.metadata,
            filename,
            &self.settings.extension,
            metadata_defaults(&self.settings),
        );
        CatalogEntry::from_metadata(metadata, split.content)
    }

    /// Rebuilds the catalog from the documents in storage.
    ///
    /// Files come from the configured list, else from listing the base path
    /// (when discovery is on), else from whichever probe files exist. With
    /// no files at all the fallback projects are installed. A scan that
    /// loads nothing leaves the catalog as it was.
    #[instrument(skip(self))]
    pub async fn refresh_catalog(&self) -> RefreshOutcome {
        if !self.settings.auto_load_enabled {
            tracing::debug!("auto-loading disabled");
            return RefreshOutcome::Disabled;
        }

        let files = self.candidate_files().await;
        if files.is_empty() {
            let mut catalog = self.catalog.write().await;
            if !self.settings.fallback_projects.is_empty() {
                *catalog = Catalog::from_config(&self.settings);
            }
            tracing::warn!(projects = catalog.len(), "no project files found, using fallback projects");
            return RefreshOutcome::Fallback { projects: catalog.len() };
        }

        let mut scanned = Catalog::new();
        let (mut loaded, mut skipped) = (0, 0);
        let mut events = std::pin::pin!(scan(self, &files));
        while let Some(event) = events.next().await {
            match event {
                ScanEvent::Loaded(entry) => {
                    if let Err(err) = scanned.add(entry) {
                        tracing::warn!(error = %err, "dropping scanned project");
                    }
                },
                ScanEvent::Complete { loaded: l, skipped: s } => (loaded, skipped) = (l, s),
                ScanEvent::Started | ScanEvent::Skipped { .. } => {},
            }
        }

        if !scanned.is_empty() {
            tracing::info!(projects = scanned.len(), skipped, "replacing catalog");
            *self.catalog.write().await = scanned;
        }
        RefreshOutcome::Scanned { loaded, skipped }
    }

    async fn candidate_files(&self) -> Vec<String> {
        if !self.settings.files.is_empty() {
            return self.settings.files.clone();
        }
        if self.settings.discover {
            let discovered = self.discover().await;
            if !discovered.is_empty() {
                return discovered;
            }
        }
        let mut found = Vec::new();
        for file in &self.settings.probe_files {
            let path = document_path(&self.settings.base_path, file);
            match self.backend.exists(Path::new(&path)).await {
                Ok(true) => found.push(file.clone()),
                Ok(false) => {},
                Err(err) => tracing::debug!(path = %path, error = %err, "probe failed"),
            }
        }
        found
    }

    /// Documents under the base path with the configured extension, as
    /// filenames relative to the base path, sorted.
    async fn discover(&self) -> Vec<String> {
        let base = self.settings.base_path.trim_matches('/');
        let prefix = (!base.is_empty()).then(|| Path::new(base));
        let listing = match self.backend.list(prefix).await {
            Ok(listing) => listing,
            Err(err) => {
                tracing::debug!(backend = self.backend.name(), error = %err, "listing failed");
                return Vec::new();
            },
        };
        let mut files: Vec<String> = listing
            .iter()
            .filter(|file| file.has_extension(&self.settings.extension))
            .filter_map(|file| {
                let relative = match prefix {
                    Some(prefix) => file.path.strip_prefix(prefix).ok()?,
                    None => file.path.as_path(),
                };
                Some(relative.to_str()?.replace('\\', "/"))
            })
            .collect();
        files.sort();
        files
    }

    fn wrap(&self, html: &str) -> String {
        let class = folio_markup::escape_all(&self.settings.container_class);
        format!("<div class=\"{class}\">\n{html}\n</div>")
    }
}
