//! Table-ready data structures for report output.
//!
//! This module provides `StatsTable`, a presentation-ready data structure
//! that renderers can consume directly or serialize to JSON.
//!
//! The data flow is:
//! 1. Observations from the walker
//! 2. Summary (aggregated, sorted, with percentages)
//! 3. StatsTable (formatted strings for display)
//!
//! StatsTable is a pure presentation layer - it only formats data, no
//! sorting or arithmetic beyond what the Summary already holds.

use serde::{Deserialize, Serialize};

use crate::data::stats::Summary;

/// Column headers, in display order.
pub const HEADERS: [&str; 4] = ["Language", "Files", "Lines", "Percentage"];

/// How counts are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberStyle {
    /// `12345`
    #[default]
    Plain,
    /// `12,345`
    Grouped,
}

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Language label, or "Total" for the footer
    pub label: String,
    /// Files, lines and percentage, ready for display
    pub values: Vec<String>,
}

/// Table-ready statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub footer: TableRow,
}

impl StatsTable {
    /// Format a summary. Rows keep the summary's order.
    pub fn from_summary(summary: &Summary, style: NumberStyle) -> Self {
        let rows = summary
            .languages
            .iter()
            .map(|row| TableRow {
                label: row.language.clone(),
                values: vec![
                    format_count(row.files, style),
                    format_count(row.lines, style),
                    format_percentage(row.percentage),
                ],
            })
            .collect();

        // Percentages only add up to 100 when something was counted
        let footer_share = if summary.total_lines > 0 { 100.0 } else { 0.0 };
        let footer = TableRow {
            label: "Total".to_string(),
            values: vec![
                format_count(summary.total_files, style),
                format_count(summary.total_lines, style),
                format_percentage(footer_share),
            ],
        };

        StatsTable {
            headers: HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
            footer,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display width of each column across headers, rows and footer.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in self.rows.iter().chain(std::iter::once(&self.footer)) {
            let cells = std::iter::once(&row.label).chain(row.values.iter());
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

/// Format a count, optionally with thousands separators.
pub fn format_count(value: u64, style: NumberStyle) -> String {
    let digits = value.to_string();
    if style == NumberStyle::Plain {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a percentage with two decimals, e.g. `83.33%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::LanguageStats;

    fn sample_summary() -> Summary {
        Summary {
            languages: vec![
                LanguageStats {
                    language: "Python".to_string(),
                    files: 2,
                    lines: 15,
                    percentage: 15.0 / 18.0 * 100.0,
                },
                LanguageStats {
                    language: "Markdown".to_string(),
                    files: 1,
                    lines: 3,
                    percentage: 3.0 / 18.0 * 100.0,
                },
            ],
            total_files: 3,
            total_lines: 18,
        }
    }

    #[test]
    fn test_from_summary() {
        let table = StatsTable::from_summary(&sample_summary(), NumberStyle::Plain);

        assert_eq!(table.headers, vec!["Language", "Files", "Lines", "Percentage"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].label, "Python");
        assert_eq!(table.rows[0].values, vec!["2", "15", "83.33%"]);
        assert_eq!(table.rows[1].values, vec!["1", "3", "16.67%"]);
        assert_eq!(table.footer.label, "Total");
        assert_eq!(table.footer.values, vec!["3", "18", "100.00%"]);
    }

    #[test]
    fn test_footer_share_with_no_lines() {
        let summary = Summary {
            languages: vec![LanguageStats {
                language: "Python".to_string(),
                files: 1,
                lines: 0,
                percentage: 0.0,
            }],
            total_files: 1,
            total_lines: 0,
        };

        let table = StatsTable::from_summary(&summary, NumberStyle::Plain);

        assert_eq!(table.rows[0].values[2], "0.00%");
        assert_eq!(table.footer.values[2], "0.00%");
    }

    #[test]
    fn test_empty_summary() {
        let table = StatsTable::from_summary(&Summary::default(), NumberStyle::Plain);

        assert!(table.is_empty());
        assert_eq!(table.footer.values, vec!["0", "0", "0.00%"]);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0, NumberStyle::Grouped), "0");
        assert_eq!(format_count(999, NumberStyle::Grouped), "999");
        assert_eq!(format_count(1000, NumberStyle::Grouped), "1,000");
        assert_eq!(format_count(1234567, NumberStyle::Grouped), "1,234,567");
        assert_eq!(format_count(1234567, NumberStyle::Plain), "1234567");
    }

    #[test]
    fn test_column_widths() {
        let table = StatsTable::from_summary(&sample_summary(), NumberStyle::Plain);

        assert_eq!(table.column_widths(), vec![8, 5, 5, 10]);
    }
}
