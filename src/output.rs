//! Console rendering of the summary table.

use crate::matrix::SummaryTable;

/// Which derived column orders the report, ascending. Raw and persisted
/// data are never reordered; sorting is display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortBy {
    /// Weighted average of travel times (last column).
    #[default]
    #[value(name = "wa")]
    WeightedAverage,
    /// Unweighted average (second to last column).
    #[value(name = "a")]
    Average,
    #[value(name = "none")]
    None,
}

/// Renders the table with aligned columns, rows optionally sorted.
pub fn render(table: &SummaryTable, sort: SortBy) -> String {
    let mut rows: Vec<&Vec<String>> = table.rows.iter().collect();

    let sort_column = match sort {
        SortBy::WeightedAverage => Some(table.header.len().saturating_sub(1)),
        SortBy::Average => Some(table.header.len().saturating_sub(2)),
        SortBy::None => None,
    };
    if let Some(column) = sort_column {
        rows.sort_by(|a, b| cell_value(a, column).total_cmp(&cell_value(b, column)));
    }

    let mut widths: Vec<usize> = table.header.iter().map(String::len).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(&table.header, &widths));
    out.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format_line(&separator, &widths));
    for row in rows {
        out.push('\n');
        out.push_str(&format_line(row, &widths));
    }
    out
}

pub fn print_table(table: &SummaryTable, sort: SortBy) {
    println!("{}", render(table, sort));
}

/// Sort key for one cell; anything non-numeric sorts last.
fn cell_value(row: &[String], column: usize) -> f64 {
    row.get(column)
        .and_then(|cell| cell.parse::<f64>().ok())
        .unwrap_or(f64::INFINITY)
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SummaryTable {
        SummaryTable {
            header: vec![
                "Apartment".into(),
                "Work".into(),
                "Walk".into(),
                "Transit".into(),
                "Average".into(),
                "Wt. Average".into(),
            ],
            rows: vec![
                vec![
                    "12 Oak St".into(),
                    "30".into(),
                    "88".into(),
                    "72".into(),
                    "30.0".into(),
                    "30.0".into(),
                ],
                vec![
                    "9 Elm Ave".into(),
                    "10".into(),
                    "NA".into(),
                    "NA".into(),
                    "10.0".into(),
                    "10.0".into(),
                ],
            ],
        }
    }

    #[test]
    fn test_sort_by_weighted_average_ascending() {
        let rendered = render(&table(), SortBy::WeightedAverage);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[2].starts_with("9 Elm Ave"));
        assert!(lines[3].starts_with("12 Oak St"));
    }

    #[test]
    fn test_no_sort_preserves_row_order() {
        let rendered = render(&table(), SortBy::None);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[2].starts_with("12 Oak St"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let rendered = render(&table(), SortBy::None);
        let lines: Vec<&str> = rendered.lines().collect();

        // "Wt. Average" starts at the same offset in every line.
        let offset = lines[0].find("Wt. Average").unwrap();
        assert!(lines[1].starts_with("---------"));
        assert!(lines[2].len() >= offset);
    }
}
