use crate::consts;
use crate::escape;
use crate::stash;

/// Splits text on blank lines and wraps every chunk that is not already a
/// block in `<p>`, turning single newlines into `<br>`.
pub fn format_paragraphs(text: &str) -> String {
    consts::BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| match is_block(chunk) {
            true => chunk.to_string(),
            false => format!("<p>{}</p>", chunk.replace('\n', "<br>")),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_block(chunk: &str) -> bool {
    stash::starts_with_block(chunk) || escape::is_block_tag(chunk)
}
