//! Block-level constructs.
//!
//! Passes run over already-escaped text in a fixed order. Code runs first so
//! nothing inside a code block is ever seen by a later pass. Every block is
//! emitted surrounded by blank lines, so the paragraph formatter sees it as a
//! chunk of its own.

mod code;
mod container;
mod heading;
mod list;
mod quote;
mod table;

use crate::stash::Stash;

/// Runs every block pass over escaped text and restores what they stashed.
pub fn extract_blocks(text: &str) -> String {
    let mut stash = Stash::default();
    let text = extract(text, &mut stash);
    stash.restore(&text).into_owned()
}

pub(crate) fn extract(text: &str, stash: &mut Stash) -> String {
    let text = code::fenced(text, stash);
    let text = code::indented(&text, stash);
    let text = container::containers(&text, stash);
    let text = quote::blockquotes(&text);
    let text = list::lists(&text);
    let text = table::tables(&text);
    let text = heading::headings(&text);
    heading::rules(&text)
}

fn block(html: &str) -> String {
    format!("\n\n{html}\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let out = extract_blocks("# One\n---\n- item");
        assert!(out.contains("</h1>\n\n"));
        assert!(out.contains("\n\n<hr>\n\n"));
        assert!(out.contains("\n\n<ul>"));
    }

    #[test]
    fn code_is_not_seen_by_later_passes() {
        let out = extract_blocks("```\n# not a heading\n- not a list\n```");
        assert_eq!(out.trim(), "<pre><code># not a heading\n- not a list</code></pre>");
    }

    #[test]
    fn container_body_goes_through_later_passes() {
        let out = extract_blocks("::: tip\n- one\n- two\n:::");
        assert!(out.contains("<p class=\"custom-block-title\">Tip</p>"));
        assert!(out.contains("<ul>\n<li>one</li>\n<li>two</li>\n</ul>"));
        assert!(out.trim_end().ends_with("</div>"));
    }
}
