use crate::models::Metadata;

const DELIMITER: &str = "---";

/// A document split into its front matter and the body that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrontMatter {
    pub metadata: Metadata,
    /// Everything after the closing delimiter line, byte for byte.
    pub content: String,
}

impl FrontMatter {
    /// Splits a leading `---` block off the text.
    ///
    /// The text must start with a delimiter line, with nothing before it.
    /// Metadata lines are split on their first `:`. Lines without one are
    /// ignored, as are lines with an empty key. When there is no closing
    /// delimiter the whole text is the body and the metadata is empty.
    pub fn split(text: &str) -> Self {
        match parse(text) {
            Some((metadata, content)) => Self {
                metadata,
                content: content.to_string(),
            },
            None => Self {
                metadata: Metadata::default(),
                content: text.to_string(),
            },
        }
    }
}

fn parse(text: &str) -> Option<(Metadata, &str)> {
    let (opening, mut rest) = text.split_once('\n')?;
    if !is_delimiter(opening) {
        return None;
    }
    let mut metadata = Metadata::default();
    loop {
        let (line, remainder) = match rest.split_once('\n') {
            Some((line, remainder)) => (line, Some(remainder)),
            None => (rest, None),
        };
        if is_delimiter(line) {
            return Some((metadata, remainder.unwrap_or_default()));
        }
        if let Some((key, value)) = line.split_once(':')
            && !key.trim().is_empty()
        {
            metadata.insert(key.trim(), value.trim());
        }
        rest = remainder?;
    }
}

// Tolerates a CRLF line ending on the delimiter line itself.
fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn round_trip() {
        let split = FrontMatter::split("---\nkey: value\n---\nBODY");
        assert_eq!(split.metadata, Metadata::from_iter([("key", "value")]));
        assert_eq!(split.content, "BODY");
    }

    #[rstest]
    #[case("no front matter here")]
    #[case("")]
    #[case(" ---\nkey: value\n---\nbody")]
    #[case("\n---\nkey: value\n---\nbody")]
    #[case("---\nkey: value\nbody without closing")]
    #[case("----\nkey: value\n----\nbody")]
    #[case("---")]
    fn no_front_matter(#[case] text: &str) {
        let split = FrontMatter::split(text);
        assert!(split.metadata.is_empty());
        assert_eq!(split.content, text);
    }

    #[test]
    fn values_keep_extra_colons() {
        let split = FrontMatter::split("---\nurl: https://example.com:8080/x\ntime : 10:30 \n---\n");
        assert_eq!(split.metadata.get("url"), Some("https://example.com:8080/x"));
        assert_eq!(split.metadata.get("time"), Some("10:30"));
        assert_eq!(split.content, "");
    }

    #[test]
    fn body_is_the_exact_suffix() {
        let body = "\n# Heading\n\n---\nnot: metadata\n---\n  trailing  \n";
        let text = format!("---\ntitle: T\n---\n{body}");
        let split = FrontMatter::split(&text);
        assert_eq!(split.content, body);
        assert!(text.ends_with(&split.content));
        assert_eq!(split.metadata.len(), 1);
    }

    #[rstest]
    #[case("---\n---\nbody", 0, "body")]
    #[case("---\njunk line\n: no key\ntitle: T\n---\nbody", 1, "body")]
    #[case("---\ntitle: T\n---", 1, "")]
    #[case("---\r\ntitle: T\r\n---\r\nbody", 1, "body")]
    fn lenient_metadata(#[case] text: &str, #[case] entries: usize, #[case] body: &str) {
        let split = FrontMatter::split(text);
        assert_eq!(split.metadata.len(), entries);
        assert_eq!(split.content, body);
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let split = FrontMatter::split("---\ntitle: First\ntitle: Second\n---\nbody");
        assert_eq!(split.metadata.get("title"), Some("Second"));
        assert_eq!(split.metadata.len(), 1);
    }
}
