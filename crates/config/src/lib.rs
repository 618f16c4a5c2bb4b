//! Layered configuration.
//!
//! Later layers override earlier ones:
//! 1. Built-in defaults
//! 2. A config file: the one passed in, otherwise `config.toml` in the
//!    platform config directory if it exists
//! 3. `FOLIO_` environment variables, with `__` separating nested keys
//!    (`FOLIO_PROJECTS__BASE_PATH=docs/`)

pub mod error;
mod projects;
mod storage;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
pub use crate::projects::{ProjectEntry, ProjectsConfig};
pub use crate::storage::StorageConfig;

const ENV_PREFIX: &str = "FOLIO_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub projects: ProjectsConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Loads configuration from every layer. An explicit `file` must exist;
    /// the default file is skipped when it doesn't.
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file = match file {
            Some(path) if !path.exists() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => default_file().filter(|path| path.exists()),
        };
        Self::from_figment(Self::figment(file.as_deref())?)
    }

    /// The merged providers, before extraction.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            tracing::debug!(path = %path.display(), "merging config file");
            figment = match extension(path).as_str() {
                "toml" => figment.merge(Toml::file(path)),
                "yaml" | "yml" => figment.merge(Yaml::file(path)),
                "json" => figment.merge(Json::file(path)),
                other => exn::bail!(ErrorKind::UnsupportedFormat(other.to_string())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract::<Config>().map_err(|err| ErrorKind::Extract(err.to_string()))?)
    }
}

/// `config.toml` in the platform's config directory for folio.
pub fn default_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn extension(path: &Path) -> String {
    path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::from_figment(Config::figment(None).unwrap()).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.projects.base_path, "projects/");
            assert_eq!(config.projects.extension, ".md");
            assert!(config.projects.auto_load_enabled);
            assert_eq!(config.projects.container_class, "project-detail");
            assert_eq!(config.storage.root, PathBuf::from("."));
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "folio.toml",
                r#"
                [projects]
                base_path = "docs/"
                files = ["b.md", "a.md"]

                [[projects.fallback_projects]]
                id = "demo"
                title = "Demo"
                image_path = "demo.png"
                "#,
            )?;
            let config = Config::load(Some(Path::new("folio.toml"))).unwrap();
            assert_eq!(config.projects.base_path, "docs/");
            assert_eq!(config.projects.files, vec!["b.md", "a.md"]);
            assert_eq!(config.projects.extension, ".md");
            assert_eq!(
                config.projects.fallback_projects,
                vec![ProjectEntry {
                    id: "demo".into(),
                    title: "Demo".into(),
                    description: None,
                    image: Some("demo.png".into()),
                    content: None,
                }]
            );
            Ok(())
        });
    }

    #[test]
    fn yaml_and_json_files() {
        Jail::expect_with(|jail| {
            jail.create_file("folio.yml", "projects:\n  extension: .markdown\n")?;
            jail.create_file("folio.json", r#"{"projects": {"auto_load_enabled": false}}"#)?;
            let yaml = Config::load(Some(Path::new("folio.yml"))).unwrap();
            assert_eq!(yaml.projects.extension, ".markdown");
            let json = Config::load(Some(Path::new("folio.json"))).unwrap();
            assert!(!json.projects.auto_load_enabled);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("folio.toml", "[projects]\nbase_path = \"docs/\"\n")?;
            jail.set_env("FOLIO_PROJECTS__BASE_PATH", "content/");
            jail.set_env("FOLIO_STORAGE__BASE_URL", "https://example.com/");
            let config = Config::load(Some(Path::new("folio.toml"))).unwrap();
            assert_eq!(config.projects.base_path, "content/");
            assert_eq!(config.storage.base_url.as_deref(), Some("https://example.com/"));
            Ok(())
        });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = Config::load(Some(Path::new("missing.toml"))).unwrap_err();
            assert!(matches!(&*err, ErrorKind::NotFound(_)));
            assert!(!err.is_retryable());
            Ok(())
        });
    }

    #[test]
    fn unsupported_format() {
        Jail::expect_with(|jail| {
            jail.create_file("folio.ini", "projects=1")?;
            let err = Config::load(Some(Path::new("folio.ini"))).unwrap_err();
            assert!(matches!(&*err, ErrorKind::UnsupportedFormat(ext) if ext == "ini"));
            assert!(!err.is_retryable());
            Ok(())
        });
    }

    #[test]
    fn wrong_types_fail_extraction() {
        Jail::expect_with(|jail| {
            jail.create_file("folio.toml", "[projects]\nauto_load_enabled = \"sometimes\"\n")?;
            let err = Config::load(Some(Path::new("folio.toml"))).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Extract(_)));
            assert!(!err.is_retryable());
            Ok(())
        });
    }
}
