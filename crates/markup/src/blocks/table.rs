use crate::consts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}
impl Align {
    fn from_separator(cell: &str) -> Option<Self> {
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Some(Align::Center),
            (true, false) => Some(Align::Left),
            (false, true) => Some(Align::Right),
            (false, false) => None,
        }
    }

    fn style(align: Option<Self>) -> &'static str {
        match align {
            Some(Align::Left) => " style=\"text-align:left\"",
            Some(Align::Center) => " style=\"text-align:center\"",
            Some(Align::Right) => " style=\"text-align:right\"",
            None => "",
        }
    }
}

/// A header row, a separator row and at least one body row become a table.
/// Body rows are padded with empty cells or truncated to the header's width.
pub(super) fn tables(text: &str) -> String {
    let lines = text.split('\n').collect::<Vec<_>>();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        match table_at(&lines[i..]) {
            Some((html, consumed)) => {
                out.push(super::block(&html));
                i += consumed;
            },
            None => {
                out.push(lines[i].to_string());
                i += 1;
            },
        }
    }
    out.join("\n")
}

fn is_row(line: &str) -> bool {
    !line.trim().is_empty() && line.contains('|')
}

fn is_separator(line: &str) -> bool {
    line.contains('|') && consts::TABLE_SEPARATOR.is_match(line)
}

/// Splits a row on `|`, dropping the empty cells the enclosing pipes leave.
fn cells(line: &str) -> Vec<&str> {
    let mut cells = line.split('|').map(str::trim).collect::<Vec<_>>();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.len() > 1 && cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

fn table_at(lines: &[&str]) -> Option<(String, usize)> {
    let [header, separator, first_body, ..] = lines else {
        return None;
    };
    if !is_row(header) || !is_separator(separator) || !is_row(first_body) {
        return None;
    }
    let headers = cells(header);
    let aligns = cells(separator).into_iter().map(Align::from_separator).collect::<Vec<_>>();
    let align = |column: usize| Align::style(aligns.get(column).copied().flatten());
    let width = headers.len();

    let mut html = String::from("<table>\n<thead>\n<tr>");
    for (column, cell) in headers.iter().enumerate() {
        html.push_str(&format!("<th{}>{cell}</th>", align(column)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    let body = lines[2..].iter().take_while(|line| is_row(line)).collect::<Vec<_>>();
    for row in &body {
        let row = cells(row);
        html.push_str("<tr>");
        for column in 0..width {
            let cell = row.get(column).copied().unwrap_or("");
            html.push_str(&format!("<td{}>{cell}</td>", align(column)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    Some((html, 2 + body.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn minimal_table() {
        assert_eq!(
            tables("|A|B|\n|-|-|\n|1|2|").trim(),
            "<table>\n<thead>\n<tr><th>A</th><th>B</th></tr>\n</thead>\n<tbody>\n<tr><td>1</td><td>2</td></tr>\n</tbody>\n</table>"
        );
    }

    #[test]
    fn alignment() {
        let out = tables("| L | C | R |\n|:--|:-:|--:|\n| 1 | 2 | 3 |");
        assert!(out.contains("<th style=\"text-align:left\">L</th>"));
        assert!(out.contains("<th style=\"text-align:center\">C</th>"));
        assert!(out.contains("<td style=\"text-align:right\">3</td>"));
    }

    #[test]
    fn ragged_rows() {
        let out = tables("a | b\n--- | ---\n| 1 |\n1 | 2 | 3");
        assert!(out.contains("<tr><td>1</td><td></td></tr>"));
        assert!(out.contains("<tr><td>1</td><td>2</td></tr>"));
        assert!(!out.contains("3"));
    }

    #[test]
    fn table_ends_at_first_line_without_pipe() {
        let out = tables("|A|\n|-|\n|1|\nafter");
        assert!(out.contains("</table>\n\n\nafter"));
    }

    #[rstest]
    #[case("|A|B|\n|-|-|")]
    #[case("|A|B|\nnot a separator\n|1|2|")]
    #[case("A B\n---\nC D")]
    fn not_a_table(#[case] input: &str) {
        assert_eq!(tables(input), input);
    }

    #[rstest]
    #[case("|a|b|", vec!["a", "b"])]
    #[case("a | b", vec!["a", "b"])]
    #[case("| a || b |", vec!["a", "", "b"])]
    fn splitting(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(cells(line), expected);
    }
}
