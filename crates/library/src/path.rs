/// Joins a base directory and a filename as written in configuration.
///
/// A non-empty base without a trailing `/` gets one, and a single leading `/`
/// is stripped from the filename, so `"projects"` + `"/alpha.md"` and
/// `"projects/"` + `"alpha.md"` name the same document.
pub fn document_path(base: &str, filename: &str) -> String {
    let filename = filename.strip_prefix('/').unwrap_or(filename);
    if base.is_empty() || base.ends_with('/') {
        format!("{base}{filename}")
    } else {
        format!("{base}/{filename}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("projects/", "alpha.md", "projects/alpha.md")]
    #[case("projects", "alpha.md", "projects/alpha.md")]
    #[case("projects/", "/alpha.md", "projects/alpha.md")]
    #[case("projects", "//alpha.md", "projects//alpha.md")]
    #[case("", "alpha.md", "alpha.md")]
    #[case("", "/alpha.md", "alpha.md")]
    #[case("a/b/", "c/d.md", "a/b/c/d.md")]
    fn joins(#[case] base: &str, #[case] filename: &str, #[case] expected: &str) {
        assert_eq!(document_path(base, filename), expected);
    }
}
