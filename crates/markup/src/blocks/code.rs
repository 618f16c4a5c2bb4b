use crate::consts;
use crate::escape::literal;
use crate::stash::{Kind, Stash};
use regex::Captures;

/// Fenced blocks, with an optional language after the opening fence.
pub(super) fn fenced(text: &str, stash: &mut Stash) -> String {
    consts::FENCED_CODE
        .replace_all(text, |caps: &Captures| {
            let body = caps[2].strip_suffix('\n').unwrap_or(&caps[2]);
            let code = literal(body, stash);
            let html = match &caps[1] {
                "" => format!("<pre><code>{code}</code></pre>"),
                language => format!("<pre><code class=\"language-{language}\">{code}</code></pre>"),
            };
            super::block(&stash.push(Kind::Block, html))
        })
        .into_owned()
}

/// Runs of lines indented by four spaces or a tab. Whitespace-only lines
/// inside a run are kept as empty lines, but never start or end one.
pub(super) fn indented(text: &str, stash: &mut Stash) -> String {
    consts::INDENTED_CODE
        .replace_all(text, |caps: &Captures| {
            let body = caps[0]
                .trim_end_matches('\n')
                .split('\n')
                .map(|line| match line.trim().is_empty() {
                    true => "",
                    false => line.strip_prefix("    ").or_else(|| line.strip_prefix('\t')).unwrap_or(line),
                })
                .collect::<Vec<_>>()
                .join("\n");
            let code = literal(&body, stash);
            super::block(&stash.push(Kind::Block, format!("<pre><code>{code}</code></pre>")))
        })
        .into_owned()
}
