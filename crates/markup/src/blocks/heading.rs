use crate::consts;
use crate::escape::unescape;
use crate::stash;
use regex::Captures;
use rslug::slugify;

/// `#` to `######` followed by whitespace and some text. The heading carries an `id` built
/// from its visible text when that text slugifies to something.
pub(super) fn headings(text: &str) -> String {
    consts::HEADING
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            let content = &caps[2];
            let slug = slugify!(&unescape(&stash::strip(content)));
            let html = match slug.is_empty() {
                true => format!("<h{level}>{content}</h{level}>"),
                false => format!("<h{level} id=\"{slug}\">{content}</h{level}>"),
            };
            super::block(&html)
        })
        .into_owned()
}

/// Three or more `-`, `*` or `_` alone on a line, optionally spaced apart.
pub(super) fn rules(text: &str) -> String {
    consts::HORIZONTAL_RULE.replace_all(text, super::block("<hr>")).into_owned()
}
