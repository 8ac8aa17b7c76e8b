//! Grouped table rendering.

use crate::convert::span::render_spans;
use crate::domain::RichText;

/// Renders a table and its collected row cells as one Markdown fragment.
///
/// Rows of unequal cell counts are padded with empty cells to the maximum
/// observed column count. With a column header, the first row becomes the
/// header line; without one, a generic `Column 1..N` header is synthesized
/// and every row is data. An empty row list renders nothing.
pub fn render_table(has_column_header: bool, rows: &[Vec<Vec<RichText>>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| render_spans(cell)).collect())
        .collect();

    let column_count = cells.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut cells {
        row.resize(column_count, String::new());
    }

    let mut lines = Vec::new();
    let data_rows: &[Vec<String>];

    if has_column_header {
        lines.push(format_row(&cells[0]));
        lines.push(separator_row(column_count));
        data_rows = &cells[1..];
    } else {
        let generic: Vec<String> = (1..=column_count).map(|i| format!("Column {i}")).collect();
        lines.push(format_row(&generic));
        lines.push(separator_row(column_count));
        data_rows = &cells[..];
    }

    for row in data_rows {
        lines.push(format_row(row));
    }

    lines.join("\n")
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn separator_row(column_count: usize) -> String {
    format!("|{}|", vec!["---"; column_count].join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Vec<RichText>> {
        cells.iter().map(|c| vec![RichText::text(*c)]).collect()
    }

    #[test]
    fn empty_row_list_renders_nothing() {
        assert_eq!(render_table(true, &[]), "");
        assert_eq!(render_table(false, &[]), "");
    }

    #[test]
    fn header_row_becomes_header_line() {
        let rows = vec![row(&["Name", "Age"]), row(&["Ada", "36"])];
        assert_eq!(
            render_table(true, &rows),
            "| Name | Age |\n|---|---|\n| Ada | 36 |"
        );
    }

    #[test]
    fn missing_header_synthesizes_generic_columns() {
        let rows = vec![row(&["a", "b"]), row(&["c", "d"])];
        assert_eq!(
            render_table(false, &rows),
            "| Column 1 | Column 2 |\n|---|---|\n| a | b |\n| c | d |"
        );
    }

    #[test]
    fn short_rows_are_padded_to_widest() {
        let rows = vec![row(&["a", "b", "c"]), row(&["d"])];
        let rendered = render_table(false, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        // every rendered row carries the same column count
        for line in &lines {
            assert_eq!(line.matches('|').count(), 4, "uneven row: {line}");
        }
        assert_eq!(lines[3], "| d |  |  |");
    }

    #[test]
    fn cell_spans_keep_inline_formatting() {
        let rows = vec![vec![vec![RichText::text("bold").bold()]]];
        assert_eq!(
            render_table(false, &rows),
            "| Column 1 |\n|---|\n| **bold** |"
        );
    }
}
