use crate::error::{ErrorKind, Result};
use folio_config::{ProjectEntry, ProjectsConfig};
use folio_extract::models::{DocumentMetadata, MetadataDefaults};
use std::sync::Arc;

/// One known project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_path: String,
    /// Body with front matter removed, when the document was read during a
    /// scan or configured inline. Otherwise it's fetched on first load.
    pub raw_body: Option<Arc<str>>,
}

impl CatalogEntry {
    /// Builds an entry from scanned metadata. Fails when there is no title.
    pub fn from_metadata(metadata: DocumentMetadata, raw_body: impl Into<Arc<str>>) -> Result<Self> {
        let Some(title) = metadata.title else {
            exn::bail!(ErrorKind::InvalidProject(format!("{} has no title", metadata.id)));
        };
        let entry = Self {
            id: metadata.id,
            title,
            description: metadata.description,
            image_path: metadata.image_path,
            raw_body: Some(raw_body.into()),
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Builds an entry from configuration, substituting the configured
    /// defaults for a missing description or image.
    pub fn from_config(entry: &ProjectEntry, settings: &ProjectsConfig) -> Self {
        let defaults = metadata_defaults(settings);
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            description: entry.description.as_deref().unwrap_or(defaults.description).to_string(),
            image_path: entry.image.as_deref().unwrap_or(defaults.image).to_string(),
            raw_body: entry.content.as_deref().map(Arc::from),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidProject(format!("\"{}\" has no id", self.title)));
        }
        if self.title.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidProject(format!("{} has no title", self.id)));
        }
        Ok(())
    }
}

/// Ordered list of known projects. Order is insertion order, which for a
/// scanned catalog is the order files were listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configured fallback catalog, dropping entries without an id
    /// or title.
    pub fn from_config(settings: &ProjectsConfig) -> Self {
        let mut catalog = Self::new();
        for entry in &settings.fallback_projects {
            if let Err(err) = catalog.add(CatalogEntry::from_config(entry, settings)) {
                tracing::warn!(error = %err, "ignoring configured project");
            }
        }
        catalog
    }

    /// First entry with a matching id.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn add(&mut self, entry: CatalogEntry) -> Result<()> {
        entry.validate()?;
        self.entries.push(entry);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

pub(crate) fn metadata_defaults(settings: &ProjectsConfig) -> MetadataDefaults<'_> {
    MetadataDefaults {
        description: &settings.default_description,
        image: &settings.default_image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_extract::models::Metadata;
    use rstest::rstest;

    fn entry(id: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            image_path: String::new(),
            raw_body: None,
        }
    }

    #[test]
    fn keeps_insertion_order_and_finds_first_match() {
        let mut catalog = Catalog::new();
        catalog.add(entry("beta", "Beta")).unwrap();
        catalog.add(entry("alpha", "Alpha")).unwrap();
        catalog.add(entry("beta", "Beta again")).unwrap();
        let ids: Vec<_> = catalog.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, ["beta", "alpha", "beta"]);
        assert_eq!(catalog.get("beta").unwrap().title, "Beta");
        assert!(catalog.get("gamma").is_none());
    }

    #[rstest]
    #[case("", "Title")]
    #[case("id", "")]
    #[case("  ", "Title")]
    #[case("id", " \t")]
    fn rejects_missing_id_or_title(#[case] id: &str, #[case] title: &str) {
        let mut catalog = Catalog::new();
        let err = catalog.add(entry(id, title)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidProject(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn config_entries_get_defaults() {
        let settings = ProjectsConfig {
            fallback_projects: vec![
                ProjectEntry {
                    id: "demo".into(),
                    title: "Demo".into(),
                    description: None,
                    image: Some("demo.png".into()),
                    content: Some("# Demo".into()),
                },
                ProjectEntry {
                    id: "".into(),
                    title: "Nameless".into(),
                    description: None,
                    image: None,
                    content: None,
                },
            ],
            ..ProjectsConfig::default()
        };
        let catalog = Catalog::from_config(&settings);
        assert_eq!(catalog.len(), 1);
        let demo = catalog.get("demo").unwrap();
        assert_eq!(demo.description, "Project description");
        assert_eq!(demo.image_path, "demo.png");
        assert_eq!(demo.raw_body.as_deref(), Some("# Demo"));
    }

    #[test]
    fn scanned_entry_needs_title() {
        let settings = ProjectsConfig::default();
        let metadata: Metadata = [("description", "Untitled")].into_iter().collect();
        let derived = DocumentMetadata::derive(&metadata, "alpha.md", ".md", metadata_defaults(&settings));
        let err = CatalogEntry::from_metadata(derived, "body").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidProject(reason) if reason.contains("alpha")));
    }
}
