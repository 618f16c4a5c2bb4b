/// Consecutive `>` lines become one blockquote. Nesting is not supported: a
/// second `>` shows up as text.
pub(super) fn blockquotes(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut quoted: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if let Some(rest) = quote_line(line) {
            quoted.push(rest);
            continue;
        }
        if !quoted.is_empty() {
            out.push(super::block(&render(&quoted)));
            quoted.clear();
        }
        out.push(line.to_string());
    }
    if !quoted.is_empty() {
        out.push(super::block(&render(&quoted)));
    }
    out.join("\n")
}

// The marker has already been escaped by the time blocks are extracted.
fn quote_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("&gt;")?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn render(lines: &[&str]) -> String {
    let paragraphs = lines
        .split(|line| line.trim().is_empty())
        .filter(|group| !group.is_empty())
        .map(|group| format!("<p>{}</p>", group.join("<br>")))
        .collect::<Vec<_>>();
    format!("<blockquote>\n{}\n</blockquote>", paragraphs.join("\n"))
}
