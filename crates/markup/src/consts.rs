use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Tag names that open a block of their own. A paragraph chunk starting with
/// one of these is left unwrapped.
pub(crate) const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "dialog", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

// Escaping
regex!(HTML_TAG, r"<!--(?s:.*?)-->|</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>");
regex!(TAG_NAME, r"^</?([A-Za-z][A-Za-z0-9-]*)");
regex!(ENTITY, r"&(amp|lt|gt|quot|#39);");
regex!(PLACEHOLDER, "\u{E000}([BI])([0-9]+)\u{E001}");

// Blocks
regex!(FENCED_CODE, r"(?m)^```[ \t]*([A-Za-z0-9_+#.-]*)[ \t]*\n((?s:.*?))^```[ \t]*$");
// Blank lines only join a run when more indented code follows them.
regex!(
    INDENTED_CODE,
    r"(?m)^(?: {4}|\t)[^\n]*\S[^\n]*(?:\n(?:[ \t]*\n)*(?: {4}|\t)[^\n]*\S[^\n]*)*(?:\n|$)"
);
regex!(ORDERED_ITEM, r"^ {0,3}([0-9]+)\.[ \t]+(.*)$");
regex!(UNORDERED_ITEM, r"^ {0,3}[-*+][ \t]+(.*)$");
regex!(TASK_MARKER, r"^\[([ xX])\][ \t]+");
regex!(TABLE_SEPARATOR, r"^[ \t]*\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)*\|?[ \t]*$");
regex!(HEADING, r"(?m)^(#{1,6})[ \t]+(\S.*?)[ \t]*$");
regex!(HORIZONTAL_RULE, r"(?m)^(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$");
regex!(CONTAINER_OPEN, r"^:::[ \t]*(tip|warning|danger)(?:[ \t]+([^\n]*?))?[ \t]*$");
regex!(CONTAINER_CLOSE, r"^:::[ \t]*$");

// Inline
regex!(BOLD, r"\*\*([^\n]+?)\*\*");
regex!(ITALIC, r"\*([^*\n]+)\*");
regex!(STRIKETHROUGH, r"~~([^\n]+?)~~");
regex!(INLINE_CODE, r"`([^`\n]+)`");
regex!(LINK, r"(!?)\[([^\]\n]*)\]\(([^)\s]+)(?:[ \t]+&quot;([^\n]*?)&quot;)?\)");
regex!(IMAGE, r"!\[([^\]\n]*)\]\(([^)\s]+)(?:[ \t]+&quot;([^\n]*?)&quot;)?\)");
regex!(EMOJI_SHORTCODE, r":([a-z0-9_+-]+):");
// Finished anchors and images match first so the URLs inside them are skipped.
regex!(
    BARE_URL,
    "(?s)<a\\s[^>]*>.*?</a>|<img\\s[^>]*>|\\b(https?://(?:[^\\s<>&\u{E000}\u{E001}]|&amp;)+)"
);

// Paragraphs
regex!(BLANK_LINES, r"\n[ \t]*\n\s*");
