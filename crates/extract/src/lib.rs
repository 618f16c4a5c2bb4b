mod front_matter;
pub mod models;

use tracing::instrument;

pub use crate::front_matter::FrontMatter;

/// Top-level entrypoint for splitting a Markdown document into front matter
/// and body. Never fails: a document without a well-formed leading block is
/// all body. See [`FrontMatter::split`].
#[instrument(skip(text), fields(text_size = text.len()))]
pub fn extract_front_matter(text: &str) -> FrontMatter {
    let split = FrontMatter::split(text);
    tracing::trace!(keys = split.metadata.len(), body_size = split.content.len(), "split front matter");
    split
}
