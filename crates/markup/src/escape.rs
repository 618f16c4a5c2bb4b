//! HTML escaping for untrusted prose.
//!
//! Well-formed tags (opening, closing, self-closing and comments) are treated
//! as author-supplied markup and survive escaping. Everything else that could
//! be read as markup is turned into an entity.

use crate::consts;
use crate::stash::{Kind, Stash};
use regex::Captures;
use std::borrow::Cow;

/// Escapes `& < > " '` outside of well-formed tags.
///
/// Idempotent on text without markup-significant characters, and never emits
/// a `<` that does not open a tag from the input.
pub fn escape(text: &str) -> String {
    let mut stash = Stash::default();
    let protected = protect(text, &mut stash);
    stash.restore(&protected).into_owned()
}

/// Escapes `& < > " '` everywhere, tags included.
pub fn escape_all(text: &str) -> String {
    if !needs_escaping(text) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Reverses the five entities produced by [`escape_all`] in a single pass, so
/// `&amp;lt;` becomes `&lt;` and not `<`.
///
/// Well-formed tags are copied as they are: an entity inside an attribute
/// value stays encoded, so [`escape`] reads the same tags back.
pub fn unescape(text: &str) -> String {
    if memchr::memchr(b'&', text.as_bytes()).is_none() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for tag in consts::HTML_TAG.find_iter(text) {
        out.push_str(&decode(&text[last..tag.start()]));
        out.push_str(tag.as_str());
        last = tag.end();
    }
    out.push_str(&decode(&text[last..]));
    out
}

fn decode(text: &str) -> Cow<'_, str> {
    consts::ENTITY.replace_all(text, |caps: &Captures| match &caps[1] {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        _ => "'",
    })
}

/// Source text of a code span or block: trusted tags come back as written and
/// everything is escaped, so the HTML shows literally.
pub(crate) fn literal(text: &str, stash: &Stash) -> String {
    escape_all(&unescape(&stash.restore(text)))
}

/// Escapes the text and parks every well-formed tag in the stash.
///
/// Tags whose name is a block-level element (and comments) are stashed as
/// [`Kind::Block`] so a paragraph chunk that starts with one is not wrapped.
pub(crate) fn protect(text: &str, stash: &mut Stash) -> String {
    if !needs_escaping(text) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut last = 0;
    for tag in consts::HTML_TAG.find_iter(text) {
        out.push_str(&escape_all(&text[last..tag.start()]));
        let kind = if is_block_tag(tag.as_str()) { Kind::Block } else { Kind::Inline };
        out.push_str(&stash.push(kind, tag.as_str()));
        last = tag.end();
    }
    out.push_str(&escape_all(&text[last..]));
    out
}

/// Returns `true` for comments and for tags naming a block-level element.
pub(crate) fn is_block_tag(tag: &str) -> bool {
    if tag.starts_with("<!--") {
        return true;
    }
    consts::TAG_NAME
        .captures(tag)
        .is_some_and(|caps| consts::BLOCK_TAGS.contains(&caps[1].to_ascii_lowercase().as_str()))
}

fn needs_escaping(text: &str) -> bool {
    let bytes = text.as_bytes();
    memchr::memchr3(b'&', b'<', b'>', bytes).is_some() || memchr::memchr2(b'"', b'\'', bytes).is_some()
}
