use crate::consts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}
impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

struct Item<'a> {
    kind: ListKind,
    number: Option<&'a str>,
    content: &'a str,
}

/// `- - -` and `* * *` are rules, not items.
fn item(line: &str) -> Option<Item<'_>> {
    if consts::HORIZONTAL_RULE.is_match(line) {
        return None;
    }
    if let Some(caps) = consts::ORDERED_ITEM.captures(line) {
        return Some(Item {
            kind: ListKind::Ordered,
            number: caps.get(1).map(|m| m.as_str()),
            content: caps.get(2).map_or("", |m| m.as_str()),
        });
    }
    consts::UNORDERED_ITEM.captures(line).map(|caps| Item {
        kind: ListKind::Unordered,
        number: None,
        content: caps.get(1).map_or("", |m| m.as_str()),
    })
}

/// Groups consecutive items of the same kind into one list.
///
/// A blank line does not end a list when the next non-blank line is another
/// item of the same kind, so two lists separated only by blank lines merge.
pub(super) fn lists(text: &str) -> String {
    let lines = text.split('\n').collect::<Vec<_>>();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let Some(first) = item(lines[i]) else {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        };
        let kind = first.kind;
        let start = first.number.and_then(|n| n.parse::<u64>().ok()).filter(|n| *n != 1);
        let mut items = Vec::new();
        while i < lines.len() {
            match item(lines[i]) {
                Some(next) if next.kind == kind => {
                    items.push(render_item(next.content));
                    i += 1;
                },
                Some(_) => break,
                None if lines[i].trim().is_empty() => {
                    let resume = lines[i..].iter().position(|l| !l.trim().is_empty()).map(|offset| i + offset);
                    if let Some(n) = resume
                        && item(lines[n]).is_some_and(|next| next.kind == kind)
                    {
                        i = n;
                    } else {
                        break;
                    }
                },
                None => break,
            }
        }
        let tag = kind.tag();
        let open = match start {
            Some(n) => format!("<{tag} start=\"{n}\">"),
            None => format!("<{tag}>"),
        };
        out.push(super::block(&format!("{open}\n{}\n</{tag}>", items.join("\n"))));
    }
    out.join("\n")
}

fn render_item(content: &str) -> String {
    match consts::TASK_MARKER.captures(content) {
        Some(caps) => {
            let checked = if &caps[1] == " " { "" } else { " checked" };
            let rest = &content[caps[0].len()..];
            format!("<li class=\"task-list-item\"><input type=\"checkbox\"{checked} disabled> {rest}</li>")
        },
        None => format!("<li>{content}</li>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- a\n- b", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>")]
    #[case("* a\n+ b", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>")]
    #[case("1. a\n2. b", "<ol>\n<li>a</li>\n<li>b</li>\n</ol>")]
    #[case("3. c\n4. d", "<ol start=\"3\">\n<li>c</li>\n<li>d</li>\n</ol>")]
    #[case("- [ ] todo\n- [x] done", "<ul>\n<li class=\"task-list-item\"><input type=\"checkbox\" disabled> todo</li>\n<li class=\"task-list-item\"><input type=\"checkbox\" checked disabled> done</li>\n</ul>")]
    fn simple_lists(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(lists(input).trim(), expected);
    }

    #[test]
    fn blank_line_between_same_kind_items_merges() {
        assert_eq!(lists("- a\n\n- b").trim(), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn kind_change_starts_a_new_list() {
        let out = lists("- a\n1. b");
        assert!(out.contains("<ul>\n<li>a</li>\n</ul>"));
        assert!(out.contains("<ol>\n<li>b</li>\n</ol>"));
    }

    #[test]
    fn parenthesised_number_is_not_an_item() {
        assert_eq!(lists("1) text"), "1) text");
    }

    #[rstest]
    #[case("* * *")]
    #[case("- - -")]
    #[case("-  -  -  -")]
    fn spaced_rules_are_not_items(#[case] input: &str) {
        assert_eq!(lists(input), input);
    }

    #[test]
    fn marker_needs_whitespace() {
        assert_eq!(lists("-a\n*b*"), "-a\n*b*");
    }

    #[test]
    fn list_ends_before_plain_text() {
        let out = lists("- a\n\nafter");
        assert!(out.contains("</ul>\n\n"));
        assert!(out.ends_with("after"));
    }
}
