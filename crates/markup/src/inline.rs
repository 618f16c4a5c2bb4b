//! Inline rewriting: code spans, emphasis, links, images, emoji and bare URLs.
//!
//! Code spans are stashed before any other rule runs, so their content comes
//! out exactly as typed. The remaining rules apply in sequence, each over the
//! output of the one before. Links are rewritten before images, so the link
//! rule has to step around any match that starts with `!`.

use crate::consts;
use crate::escape::literal;
use crate::stash::{Kind, Stash};
use regex::Captures;
use std::borrow::Cow;

pub fn rewrite_inline(text: &str) -> String {
    let mut stash = Stash::default();
    let text = rewrite(text, &mut stash);
    stash.restore(&text).into_owned()
}

pub(crate) fn rewrite(text: &str, stash: &mut Stash) -> String {
    let text = code_spans(text, stash);
    let text = consts::BOLD.replace_all(&text, "<strong>${1}</strong>");
    let text = consts::ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = consts::STRIKETHROUGH.replace_all(&text, "<del>${1}</del>");
    let text = consts::LINK.replace_all(&text, link);
    let text = consts::IMAGE.replace_all(&text, image);
    let text = emoji(&text);
    autolink(&text).into_owned()
}

fn code_spans(text: &str, stash: &mut Stash) -> String {
    consts::INLINE_CODE
        .replace_all(text, |caps: &Captures| {
            let code = literal(&caps[1], stash);
            stash.push(Kind::Inline, format!("<code>{code}</code>"))
        })
        .into_owned()
}

fn link(caps: &Captures) -> String {
    if &caps[1] == "!" {
        return caps[0].to_string();
    }
    match caps.get(4) {
        Some(title) => format!("<a href=\"{}\" title=\"{}\">{}</a>", &caps[3], title.as_str(), &caps[2]),
        None => format!("<a href=\"{}\">{}</a>", &caps[3], &caps[2]),
    }
}

fn image(caps: &Captures) -> String {
    match caps.get(3) {
        Some(title) => format!("<img src=\"{}\" alt=\"{}\" title=\"{}\">", &caps[2], &caps[1], title.as_str()),
        None => format!("<img src=\"{}\" alt=\"{}\">", &caps[2], &caps[1]),
    }
}

/// Replaces known `:shortcode:`s. Unknown ones are left as typed.
fn emoji(text: &str) -> Cow<'_, str> {
    if memchr::memchr(b':', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    consts::EMOJI_SHORTCODE.replace_all(text, |caps: &Captures| match lookup(&caps[1]) {
        Some(emoji) => emoji.to_string(),
        None => caps[0].to_string(),
    })
}

/// Links bare `http://` and `https://` URLs. Trailing punctuation is left
/// outside the link, and so is a `)` without a matching `(`.
fn autolink(text: &str) -> Cow<'_, str> {
    if !text.contains("://") {
        return Cow::Borrowed(text);
    }
    consts::BARE_URL.replace_all(text, |caps: &Captures| {
        let Some(url) = caps.get(1) else {
            return caps[0].to_string();
        };
        let url = url.as_str();
        let href = trim_url(url);
        format!("<a href=\"{href}\">{href}</a>{}", &url[href.len()..])
    })
}

fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ':', '!', '?']);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(inner) if trimmed.matches('(').count() < trimmed.matches(')').count() => inner,
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

pub(crate) fn lookup(shortcode: &str) -> Option<&'static str> {
    EMOJI.iter().find(|(code, _)| *code == shortcode).map(|(_, emoji)| *emoji)
}

const EMOJI: &[(&str, &str)] = &[
    ("smile", "😄"),
    ("laughing", "😆"),
    ("wink", "😉"),
    ("heart", "❤️"),
    ("+1", "👍"),
    ("thumbsup", "👍"),
    ("-1", "👎"),
    ("rocket", "🚀"),
    ("star", "⭐"),
    ("fire", "🔥"),
    ("tada", "🎉"),
    ("warning", "⚠️"),
    ("white_check_mark", "✅"),
    ("x", "❌"),
    ("bulb", "💡"),
    ("memo", "📝"),
    ("sparkles", "✨"),
    ("eyes", "👀"),
    ("thinking", "🤔"),
    ("100", "💯"),
    ("coffee", "☕"),
    ("check", "✔️"),
];
