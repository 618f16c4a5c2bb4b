use crate::consts;
use crate::stash::{Kind, Stash};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Tip,
    Warning,
    Danger,
}
impl Container {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "tip" => Some(Container::Tip),
            "warning" => Some(Container::Warning),
            "danger" => Some(Container::Danger),
            _ => None,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Container::Tip => "tip",
            Container::Warning => "warning",
            Container::Danger => "danger",
        }
    }

    fn default_title(self) -> &'static str {
        match self {
            Container::Tip => "Tip",
            Container::Warning => "Warning",
            Container::Danger => "Danger",
        }
    }
}

/// `::: tip`, `::: warning` and `::: danger` open a titled `<div>` that runs
/// to the next `:::` line, or to the end of the text. Text after the kind
/// replaces the default title.
///
/// Only the opening and closing markup is stashed. The body stays in the text
/// so later passes render it like any other content. Containers don't nest:
/// an opening line inside an open container is plain text.
pub(super) fn containers(text: &str, stash: &mut Stash) -> String {
    if !text.contains(":::") {
        return text.to_string();
    }
    let mut out = Vec::new();
    let mut open = false;
    for line in text.split('\n') {
        if open && consts::CONTAINER_CLOSE.is_match(line) {
            out.push(super::block(&stash.push(Kind::Block, "</div>")));
            open = false;
            continue;
        }
        if !open && let Some(caps) = consts::CONTAINER_OPEN.captures(line) {
            let Some(container) = Container::from_name(&caps[1]) else {
                out.push(line.to_string());
                continue;
            };
            let title = caps.get(2).map_or(container.default_title(), |m| m.as_str());
            let html = format!(
                "<div class=\"{} custom-block\">\n<p class=\"custom-block-title\">{title}</p>",
                container.class()
            );
            out.push(super::block(&stash.push(Kind::Block, html)));
            open = true;
            continue;
        }
        out.push(line.to_string());
    }
    if open {
        out.push(super::block(&stash.push(Kind::Block, "</div>")));
    }
    out.join("\n")
}
