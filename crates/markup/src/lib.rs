mod blocks;
mod consts;
mod escape;
mod inline;
mod paragraph;
mod stash;

use std::borrow::Cow;

use tracing::instrument;

pub use crate::blocks::extract_blocks;
pub use crate::escape::{escape, escape_all, unescape};
pub use crate::inline::rewrite_inline;
pub use crate::paragraph::format_paragraphs;
use crate::stash::Stash;

/// Renders the Markdown dialect to an HTML fragment.
///
/// Never fails: anything the dialect doesn't recognise comes out as escaped,
/// paragraph-wrapped text. Author-supplied tags are trusted and kept as-is;
/// everything else that could be read as markup is escaped.
#[instrument(skip(text), fields(text_size = text.len()))]
pub fn render(text: &str) -> String {
    let text = normalize_newlines(text);
    let mut stash = Stash::default();
    // Stage order is load-bearing:
    // - Escaping comes first. Trusted tags are parked as placeholders here and
    //   only come back in the final restore, so no later pass can rewrite them.
    // - Blocks run before inline rules. Code blocks and code spans are stashed
    //   whole, which keeps emphasis, links and emoji out of them.
    // - Paragraphs run after both, and rely on every block being surrounded by
    //   blank lines.
    let text = escape::protect(&text, &mut stash);
    let text = blocks::extract(&text, &mut stash);
    let text = inline::rewrite(&text, &mut stash);
    let text = paragraph::format_paragraphs(&text);
    stash.restore(&text).into_owned()
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    match memchr::memchr(b'\r', text.as_bytes()) {
        Some(_) => Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n")),
        None => Cow::Borrowed(text),
    }
}
