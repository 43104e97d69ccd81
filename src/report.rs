//! Plain-text tables for listing aliases and resolutions on stdout.

use std::fmt::Write as _;

/// Renders `rows` under `headers` with two-space gutters and a dashed rule.
/// Cells wider than their header widen the whole column; line breaks and
/// tabs inside cells are flattened to spaces.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cleaned = rows
        .iter()
        .map(|row| row.iter().map(|cell| flatten(cell)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = headers
        .iter()
        .map(|h| h.chars().count())
        .collect::<Vec<_>>();
    for row in &cleaned {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = widths
        .iter()
        .map(|w| "-".repeat((*w).max(3)))
        .collect::<Vec<_>>();

    let mut output = String::new();
    push_line(&mut output, headers.iter().copied(), &widths);
    push_line(&mut output, rule.iter().map(String::as_str), &widths);
    for row in &cleaned {
        push_line(&mut output, row.iter().map(String::as_str), &widths);
    }
    output
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn flatten(cell: &str) -> String {
    cell.replace(['\n', '\r', '\t'], " ")
}

fn push_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (idx, (cell, &width)) in cells.zip(widths).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}");
    }
    let _ = writeln!(output, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let rows = vec![
            vec!["qty".to_string(), "quantity".to_string()],
            vec!["amt".to_string(), "amount".to_string()],
        ];
        let rendered = render_table(&["alias", "canonical"], &rows);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "alias  canonical",
                "-----  ---------",
                "qty    quantity",
                "amt    amount",
            ]
        );
    }

    #[test]
    fn control_characters_are_flattened() {
        let rows = vec![vec!["a\nb\tc".to_string()]];
        let rendered = render_table(&["note"], &rows);
        assert_eq!(rendered.lines().nth(2), Some("a b c"));
    }

    #[test]
    fn short_headers_get_a_minimum_rule() {
        let rendered = render_table(&["#"], &[vec!["1".to_string()]]);
        assert_eq!(rendered.lines().nth(1), Some("---"));
    }
}
