mod cli;
mod error;

use crate::cli::{Cli, Command, Source};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use folio_config::{Config, StorageConfig};
use folio_extract::{FrontMatter, extract_front_matter};
use folio_library::{Catalog, Loader, RefreshOutcome};
use folio_storage::BackendHandle;
use folio_storage::backend::{HttpBackend, LocalBackend};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "folio=info";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

/// Logs go to stderr so stdout stays pipeable. `RUST_LOG` overrides the
/// default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(command: Command) -> Result<()> {
    let output = match command {
        Command::Render { file } => {
            let split = extract_front_matter(&read(&file).await?);
            folio_markup::render(&split.content)
        },
        Command::Split { file, json } => {
            let split = extract_front_matter(&read(&file).await?);
            match json {
                true => serde_json::to_string_pretty(&split).or_raise(|| ErrorKind::Output)?,
                false => format_split(&split),
            }
        },
        Command::Load { id, source } => {
            let loader = open_loader(&source).await?;
            let project = loader.load_project(&id).await.or_raise(|| ErrorKind::Load(id.clone()))?;
            format!("{}\n\n{}", project.title, project.content)
        },
        Command::Scan { source } => {
            let loader = open_loader(&source).await?;
            format_catalog(&loader.catalog().await)
        },
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end()).or_raise(|| ErrorKind::Output)?;
    Ok(())
}

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.or_raise(|| ErrorKind::Read(path.to_path_buf()))
}

async fn open_loader(source: &Source) -> Result<Loader> {
    let config = Config::load(source.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let backend = open_backend(&config.storage, source.root.as_deref())?;
    tracing::debug!(backend = backend.name(), "opened storage");
    let loader = Loader::new(backend, config.projects);
    match loader.refresh_catalog().await {
        RefreshOutcome::Disabled => tracing::info!("catalog scanning disabled"),
        RefreshOutcome::Fallback { projects } => tracing::info!(projects, "using fallback catalog"),
        RefreshOutcome::Scanned { loaded, skipped } => tracing::info!(loaded, skipped, "scanned catalog"),
    }
    Ok(loader)
}

/// An explicit `root` wins over everything in the configuration.
fn open_backend(storage: &StorageConfig, root: Option<&Path>) -> Result<BackendHandle> {
    if root.is_none()
        && let Some(url) = &storage.base_url
    {
        let backend = HttpBackend::new("http", url).or_raise(|| ErrorKind::Storage)?;
        return Ok(Arc::new(backend));
    }
    let root = root.unwrap_or(storage.root.as_path());
    let root = std::fs::canonicalize(root).or_raise(|| ErrorKind::Storage)?;
    let backend = LocalBackend::new("local", root).or_raise(|| ErrorKind::Storage)?;
    tracing::debug!(root = %backend.root().display(), "reading documents from directory");
    Ok(Arc::new(backend))
}

fn format_split(split: &FrontMatter) -> String {
    let mut output = String::new();
    for (key, value) in split.metadata.iter() {
        output.push_str(&format!("{key}: {value}\n"));
    }
    if !split.metadata.is_empty() {
        output.push('\n');
    }
    output.push_str(&split.content);
    output
}

fn format_catalog(catalog: &Catalog) -> String {
    catalog
        .iter()
        .map(|entry| format!("{}\t{}\t{}\n", entry.id, entry.title, entry.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_library::CatalogEntry;
    use std::path::PathBuf;

    #[test]
    fn split_lists_metadata_before_body() {
        let split = extract_front_matter("---\ntitle: Alpha\nurl: http://x\n---\nBody\n");
        assert_eq!(format_split(&split), "title: Alpha\nurl: http://x\n\nBody\n");
        let plain = extract_front_matter("Body only");
        assert_eq!(format_split(&plain), "Body only");
    }

    #[test]
    fn split_as_json() {
        let split = extract_front_matter("---\ntitle: Alpha\n---\nBody");
        let json: serde_json::Value = serde_json::to_value(&split).unwrap();
        assert_eq!(json["metadata"]["title"], "Alpha");
        assert_eq!(json["content"], "Body");
    }

    #[test]
    fn catalog_listing() {
        let mut catalog = Catalog::new();
        catalog
            .add(CatalogEntry {
                id: "alpha".into(),
                title: "Alpha".into(),
                description: "First".into(),
                image_path: String::new(),
                raw_body: None,
            })
            .unwrap();
        assert_eq!(format_catalog(&catalog), "alpha\tAlpha\tFirst\n");
    }

    #[test]
    fn root_overrides_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig {
            root: PathBuf::from("does-not-exist"),
            base_url: Some("https://example.com/site".into()),
        };
        assert_eq!(open_backend(&storage, Some(dir.path())).unwrap().name(), "local");
        assert_eq!(open_backend(&storage, None).unwrap().name(), "http");
    }

    #[test]
    fn missing_root_fails() {
        let storage = StorageConfig {
            root: PathBuf::from("/definitely/not/here"),
            base_url: None,
        };
        let err = open_backend(&storage, None).err().unwrap();
        assert!(matches!(&*err, ErrorKind::Storage));
    }

    #[tokio::test]
    async fn loads_from_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("projects")).unwrap();
        std::fs::write(dir.path().join("projects/alpha.md"), "---\ntitle: Alpha\n---\n# Hello").unwrap();
        let storage = StorageConfig {
            root: dir.path().to_path_buf(),
            base_url: None,
        };
        let backend = open_backend(&storage, None).unwrap();
        let settings = folio_config::ProjectsConfig {
            files: vec!["alpha.md".into()],
            ..Default::default()
        };
        let loader = Loader::new(backend, settings);
        assert_eq!(loader.refresh_catalog().await, RefreshOutcome::Scanned { loaded: 1, skipped: 0 });
        let project = loader.load_project("alpha").await.unwrap();
        assert_eq!(project.title, "Alpha");
        assert!(project.content.contains("<h1 id=\"hello\">Hello</h1>"));
    }
}
