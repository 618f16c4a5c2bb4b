use serde::{Deserialize, Serialize};

/// Where project documents live and how the catalog is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    /// Directory (relative to the storage root) holding the documents.
    pub base_path: String,
    /// Appended to a project id to get its filename. Includes the dot.
    pub extension: String,
    /// When false, the catalog is never scanned and stays as configured.
    pub auto_load_enabled: bool,
    /// Explicit, ordered list of files to scan. Catalog order follows it.
    pub files: Vec<String>,
    /// List `base_path` for documents when `files` is empty. Only backends
    /// that can enumerate their contents support this.
    pub discover: bool,
    /// Filenames to check for when neither `files` nor discovery found any.
    pub probe_files: Vec<String>,
    /// Catalog to fall back to when no file could be found.
    pub fallback_projects: Vec<ProjectEntry>,
    /// Class of the element wrapping every rendered document.
    pub container_class: String,
    pub default_description: String,
    pub default_image: String,
}
impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            base_path: "projects/".to_string(),
            extension: ".md".to_string(),
            auto_load_enabled: true,
            files: Vec::new(),
            discover: false,
            probe_files: Vec::new(),
            fallback_projects: Vec::new(),
            container_class: "project-detail".to_string(),
            default_description: "Project description".to_string(),
            default_image: "https://via.placeholder.com/350x200".to_string(),
        }
    }
}

/// A statically configured catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "image_path", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Inline Markdown body. Without it the document is fetched on first load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
