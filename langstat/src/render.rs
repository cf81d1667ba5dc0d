//! Report rendering for CLI output.
//!
//! Three formats, all built on the library's `StatsTable`:
//!
//! - plain: fixed-width text with `|` separators
//! - decorated: a box-drawn table with coloured columns
//! - json: the serialized `CountResult`

use std::fmt::Write as _;
use std::path::Path;

use console::Style;
use langstatlib::{CountResult, NumberStyle, StatsTable};

const TITLE: &str = "Code Language Statistics";
const EMPTY_MESSAGE: &str = "No code files were found or analyzed.";

/// Selected output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Self {
        match name {
            "plain" => OutputFormat::Plain,
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Render the lines printed before the report.
pub fn render_header(root: &Path, ignore_file: Option<&str>, format: OutputFormat) -> String {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {}
        OutputFormat::Plain => {
            let _ = writeln!(out, "Analyzing project at: {}", root.display());
            if let Some(name) = ignore_file {
                let _ = writeln!(out, "Ignoring files specified in {}.", name);
            }
            let _ = writeln!(out, "{}", "-".repeat(40));
        }
        OutputFormat::Table => {
            let path = Style::new().cyan().bold();
            let _ = writeln!(
                out,
                "Analyzing project at: {}",
                path.apply_to(root.display())
            );
            if let Some(name) = ignore_file {
                let note = Style::new().yellow().italic();
                let _ = writeln!(
                    out,
                    "{}",
                    note.apply_to(format!("Ignoring files specified in {}.", name))
                );
            }
            let _ = writeln!(out, "{}", "─".repeat(60));
        }
    }
    out
}

/// Render a count result in the requested format.
pub fn render(result: &CountResult, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(result)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Plain => Ok(render_plain(&StatsTable::from_summary(
            &result.summary,
            NumberStyle::Plain,
        ))),
        OutputFormat::Table => Ok(render_decorated(&StatsTable::from_summary(
            &result.summary,
            NumberStyle::Grouped,
        ))),
    }
}

/// Render a fixed-width text table.
pub fn render_plain(table: &StatsTable) -> String {
    if table.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let name_width = table.column_widths()[0];
    let separator = format!(
        "{}-|----------|--------------|-------------",
        "-".repeat(name_width)
    );

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<w$} | {:>8} | {:>12} | {:>12}",
        table.headers[0],
        table.headers[1],
        table.headers[2],
        table.headers[3],
        w = name_width
    );
    let _ = writeln!(out, "{}", separator);
    for row in &table.rows {
        let _ = writeln!(out, "{}", plain_row(&row.label, &row.values, name_width));
    }
    let _ = writeln!(out, "{}", separator);
    let _ = writeln!(
        out,
        "{}",
        plain_row(&table.footer.label, &table.footer.values, name_width)
    );
    out
}

fn plain_row(label: &str, values: &[String], name_width: usize) -> String {
    format!(
        "{:<w$} | {:>8} | {:>12} | {:>12}",
        label,
        values[0],
        values[1],
        values[2],
        w = name_width
    )
}

/// Render a box-drawn table with coloured columns.
///
/// Styling is dropped automatically when stdout is not a terminal.
pub fn render_decorated(table: &StatsTable) -> String {
    if table.is_empty() {
        return format!("{}\n", Style::new().yellow().apply_to(EMPTY_MESSAGE));
    }

    let widths = table.column_widths();
    let column_styles = [
        Style::new().magenta(),
        Style::new().green(),
        Style::new().cyan(),
        Style::new().yellow(),
    ];
    let header_style = Style::new().bold();
    let footer_style = Style::new().cyan().bold();

    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let inner_width: usize = widths.iter().map(|w| w + 3).sum::<usize>() - 1;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        header_style.apply_to(format!("{:^w$}", TITLE, w = inner_width + 2))
    );
    let _ = writeln!(out, "{}", border("┌", "┬", "┐"));

    let headers: Vec<String> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| header_style.apply_to(pad(h, widths[i], i > 0)).to_string())
        .collect();
    let _ = writeln!(out, "│ {} │", headers.join(" │ "));
    let _ = writeln!(out, "{}", border("├", "┼", "┤"));

    for row in &table.rows {
        let cells: Vec<String> = std::iter::once(&row.label)
            .chain(row.values.iter())
            .enumerate()
            .map(|(i, cell)| column_styles[i].apply_to(pad(cell, widths[i], i > 0)).to_string())
            .collect();
        let _ = writeln!(out, "│ {} │", cells.join(" │ "));
    }

    let _ = writeln!(out, "{}", border("├", "┼", "┤"));
    let footer: Vec<String> = std::iter::once(&table.footer.label)
        .chain(table.footer.values.iter())
        .enumerate()
        .map(|(i, cell)| footer_style.apply_to(pad(cell, widths[i], i > 0)).to_string())
        .collect();
    let _ = writeln!(out, "│ {} │", footer.join(" │ "));
    let _ = writeln!(out, "{}", border("└", "┴", "┘"));
    out
}

/// Pad to `width` display columns, right-aligned for numbers.
fn pad(cell: &str, width: usize, right: bool) -> String {
    if right {
        format!("{:>w$}", cell, w = width)
    } else {
        format!("{:<w$}", cell, w = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use langstatlib::{LanguageStats, Summary};

    fn sample_table(style: NumberStyle) -> StatsTable {
        let summary = Summary {
            languages: vec![
                LanguageStats {
                    language: "Python".to_string(),
                    files: 2,
                    lines: 1500,
                    percentage: 1500.0 / 1800.0 * 100.0,
                },
                LanguageStats {
                    language: "Markdown".to_string(),
                    files: 1,
                    lines: 300,
                    percentage: 300.0 / 1800.0 * 100.0,
                },
            ],
            total_files: 3,
            total_lines: 1800,
        };
        StatsTable::from_summary(&summary, style)
    }

    #[test]
    fn test_render_plain() {
        let out = render_plain(&sample_table(NumberStyle::Plain));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            "Language |    Files |        Lines |   Percentage"
        );
        assert_eq!(lines[2], "---------|----------|--------------|-------------");
        assert_eq!(
            lines[3],
            "Python   |        2 |         1500 |       83.33%"
        );
        assert_eq!(
            lines[6],
            "Total    |        3 |         1800 |      100.00%"
        );
    }

    #[test]
    fn test_render_decorated_contains_cells() {
        console::set_colors_enabled(false);
        let out = render_decorated(&sample_table(NumberStyle::Grouped));

        assert!(out.contains(TITLE));
        assert!(out.contains("1,500"));
        assert!(out.contains("83.33%"));
        assert!(out.contains("Total"));

        // Every table line has the same display width
        let widths: Vec<usize> = out
            .lines()
            .skip(1)
            .map(console::measure_text_width)
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_render_empty() {
        console::set_colors_enabled(false);
        let table = StatsTable::from_summary(&Summary::default(), NumberStyle::Plain);

        assert_eq!(render_plain(&table), format!("{}\n", EMPTY_MESSAGE));
        assert_eq!(render_decorated(&table), format!("{}\n", EMPTY_MESSAGE));
    }

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("plain"), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_name("table"), OutputFormat::Table);
    }
}
