use super::Metadata;

/// Values substituted for fields the front matter leaves out.
#[derive(Debug, Clone, Copy)]
pub struct MetadataDefaults<'a> {
    pub description: &'a str,
    pub image: &'a str,
}

/// The display metadata of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DocumentMetadata {
    pub id: String,
    /// Documents without a title can't be listed, but can still be rendered.
    pub title: Option<String>,
    pub description: String,
    pub image_path: String,
}

impl DocumentMetadata {
    /// Fills in everything the front matter doesn't say. Empty values count
    /// as missing.
    ///
    /// Without an `id` key the id is the filename minus `extension`, or the
    /// whole filename when it doesn't end with the extension.
    pub fn derive(metadata: &Metadata, filename: &str, extension: &str, defaults: MetadataDefaults<'_>) -> Self {
        let id = match metadata.get_non_empty("id") {
            Some(id) => id.to_string(),
            None => filename
                .strip_suffix(extension)
                .filter(|stem| !stem.is_empty() && !extension.is_empty())
                .unwrap_or(filename)
                .to_string(),
        };
        Self {
            id,
            title: metadata.get_non_empty("title").map(str::to_string),
            description: metadata.get_non_empty("description").unwrap_or(defaults.description).to_string(),
            image_path: metadata.get_non_empty("image").unwrap_or(defaults.image).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DEFAULTS: MetadataDefaults<'static> = MetadataDefaults {
        description: "Project description",
        image: "placeholder.png",
    };

    #[rstest]
    #[case("alpha.md", ".md", "alpha")]
    #[case("alpha.txt", ".md", "alpha.txt")]
    #[case(".md", ".md", ".md")]
    #[case("nested/beta.md", ".md", "nested/beta")]
    #[case("gamma", "", "gamma")]
    fn id_from_filename(#[case] filename: &str, #[case] extension: &str, #[case] expected: &str) {
        let derived = DocumentMetadata::derive(&Metadata::default(), filename, extension, DEFAULTS);
        assert_eq!(derived.id, expected);
    }

    #[test]
    fn front_matter_overrides_defaults() {
        let metadata = Metadata::from_iter([
            ("id", "custom"),
            ("title", "Custom"),
            ("description", "Described"),
            ("image", "img/c.png"),
        ]);
        let derived = DocumentMetadata::derive(&metadata, "file.md", ".md", DEFAULTS);
        assert_eq!(
            derived,
            DocumentMetadata {
                id: "custom".into(),
                title: Some("Custom".into()),
                description: "Described".into(),
                image_path: "img/c.png".into(),
            }
        );
    }

    #[test]
    fn empty_values_fall_back() {
        let metadata = Metadata::from_iter([("id", ""), ("title", ""), ("description", "")]);
        let derived = DocumentMetadata::derive(&metadata, "doc.md", ".md", DEFAULTS);
        assert_eq!(derived.id, "doc");
        assert_eq!(derived.title, None);
        assert_eq!(derived.description, "Project description");
        assert_eq!(derived.image_path, "placeholder.png");
    }
}
