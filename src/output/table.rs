//! Console rendering of the result table.

use crate::model::OutputRow;

/// Rows printed when no limit is configured.
pub const DEFAULT_SHOW_ROWS: usize = 20;

const HEADERS: [&str; 2] = ["date", "combined_result"];
const MIN_WIDTH: usize = 3;

/// Draws `rows` as a bordered, left-aligned table with cells shown in full.
///
/// At most `max_rows` rows are drawn; if more exist a
/// `only showing top N rows` line follows the table.
///
/// ```text
/// +--------+---------------+
/// |date    |combined_result|
/// +--------+---------------+
/// |20230101|11.0, 6.0      |
/// +--------+---------------+
/// ```
pub fn render_table(rows: &[OutputRow], max_rows: usize) -> String {
    let shown: Vec<[&str; 2]> = rows
        .iter()
        .take(max_rows)
        .map(|r| [r.date.as_deref().unwrap_or("null"), r.combined_result.as_str()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count().max(MIN_WIDTH));
    for cells in &shown {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let sep = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(*w));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let draw_row = |cells: &[&str; 2]| {
        let mut line = String::from("|");
        for (cell, w) in cells.iter().zip(&widths) {
            line.push_str(cell);
            line.push_str(&" ".repeat(w - cell.chars().count()));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push_str(&draw_row(&HEADERS));
    out.push_str(&sep);
    for cells in &shown {
        out.push_str(&draw_row(cells));
    }
    out.push_str(&sep);

    if rows.len() > max_rows {
        let noun = if max_rows == 1 { "row" } else { "rows" };
        out.push_str(&format!("only showing top {} {}\n", max_rows, noun));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, combined: &str) -> OutputRow {
        OutputRow {
            date: Some(date.to_string()),
            combined_result: combined.to_string(),
        }
    }

    #[test]
    fn test_renders_rows_left_aligned() {
        let rows = vec![row("20230101", "11.0, 6.0"), row("20230102", "20.0, 15.0")];

        let table = render_table(&rows, DEFAULT_SHOW_ROWS);

        let expected = "\
+--------+---------------+
|date    |combined_result|
+--------+---------------+
|20230101|11.0, 6.0      |
|20230102|20.0, 15.0     |
+--------+---------------+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let table = render_table(&[], DEFAULT_SHOW_ROWS);

        let expected = "\
+----+---------------+
|date|combined_result|
+----+---------------+
+----+---------------+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_truncation_note() {
        let rows: Vec<OutputRow> = (1..=3).map(|d| row(&format!("2023010{}", d), "1.0, 1.0")).collect();

        let table = render_table(&rows, 2);

        assert!(table.ends_with("only showing top 2 rows\n"));
        assert!(!table.contains("20230103"));
    }

    #[test]
    fn test_missing_date_shows_null() {
        let rows = vec![OutputRow {
            date: None,
            combined_result: "3.0".to_string(),
        }];

        let table = render_table(&rows, DEFAULT_SHOW_ROWS);

        assert!(table.contains("|null|3.0            |"));
    }
}
