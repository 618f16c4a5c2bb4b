//! Positional placeholders for fragments that later passes must not touch.
//!
//! A placeholder is `U+E000`, a kind marker, the fragment index and `U+E001`.
//! None of the block or inline patterns can match private-use characters or
//! a bare run of digits, so a stashed fragment passes through every stage
//! verbatim until [`Stash::restore`] swaps it back in.

use crate::consts;
use regex::Captures;
use std::borrow::Cow;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// How the paragraph formatter should treat a placeholder that starts a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    /// Stands on its own: code blocks, `<div>`, comments.
    Block,
    /// Flows with the surrounding text: `<span>`, `<a>`, `<br>`.
    Inline,
}
impl Kind {
    fn marker(self) -> char {
        match self {
            Kind::Block => 'B',
            Kind::Inline => 'I',
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Stash {
    fragments: Vec<String>,
}
impl Stash {
    /// Parks a fragment and returns the placeholder that stands in for it.
    pub(crate) fn push(&mut self, kind: Kind, fragment: impl Into<String>) -> String {
        let index = self.fragments.len();
        self.fragments.push(fragment.into());
        format!("{OPEN}{}{index}{CLOSE}", kind.marker())
    }

    /// Swaps every known placeholder back for its fragment. Unknown indices
    /// are left as they are.
    pub(crate) fn restore<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.fragments.is_empty() {
            return Cow::Borrowed(text);
        }
        consts::PLACEHOLDER.replace_all(text, |caps: &Captures| {
            caps[2]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.fragments.get(index))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
    }
}

/// Removes placeholders entirely, for contexts that only want the visible text.
pub(crate) fn strip(text: &str) -> Cow<'_, str> {
    consts::PLACEHOLDER.replace_all(text, "")
}

/// Returns `true` if the text starts with a [`Kind::Block`] placeholder.
pub(crate) fn starts_with_block(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next() == Some(OPEN) && chars.next() == Some(Kind::Block.marker())
}
