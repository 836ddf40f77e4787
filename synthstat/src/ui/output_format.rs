//! Styled stderr output: prefixed status messages and the summary table.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use owo_colors::{AnsiColors, OwoColorize};
use std::io::Write;

use synthstat_core::AnalysisReport;

use crate::ui::theme::{entry_color, ThemeEntry, ThemeMap};

fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    match entry_color(theme, entry) {
        Some(color) if enable_colors => text.color(color).to_string(),
        _ => text.to_string(),
    }
}

/// Writes an informational message.
pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> Result<()> {
    writeln!(writer, "{}", paint(msg, ThemeEntry::Info, theme, enable_colors))?;
    Ok(())
}

/// Writes a warning, prefixed with `Warning:`.
pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> Result<()> {
    let line = format!("Warning: {}", msg);
    writeln!(writer, "{}", paint(&line, ThemeEntry::Warn, theme, enable_colors))?;
    Ok(())
}

fn table_color(color: AnsiColors) -> Color {
    match color {
        AnsiColors::Black => Color::Black,
        AnsiColors::Red => Color::DarkRed,
        AnsiColors::Green => Color::DarkGreen,
        AnsiColors::Yellow => Color::DarkYellow,
        AnsiColors::Blue => Color::DarkBlue,
        AnsiColors::Magenta => Color::DarkMagenta,
        AnsiColors::Cyan => Color::DarkCyan,
        AnsiColors::White => Color::Grey,
        AnsiColors::BrightBlack => Color::DarkGrey,
        AnsiColors::BrightRed => Color::Red,
        AnsiColors::BrightGreen => Color::Green,
        AnsiColors::BrightYellow => Color::Yellow,
        AnsiColors::BrightBlue => Color::Blue,
        AnsiColors::BrightMagenta => Color::Magenta,
        AnsiColors::BrightCyan => Color::Cyan,
        AnsiColors::BrightWhite => Color::White,
        _ => Color::Reset,
    }
}

fn themed_cell(text: String, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> Cell {
    let cell = Cell::new(text);
    match entry_color(theme, entry) {
        Some(color) if enable_colors => cell.fg(table_color(color)),
        _ => cell,
    }
}

/// Builds the summary table: the five statistics plus the fitted line.
pub fn build_summary_table(report: &AnalysisReport, theme: &ThemeMap, enable_colors: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic);
    if !enable_colors {
        table.force_no_tty();
    }

    table.set_header(vec![
        themed_cell("Statistic".to_string(), ThemeEntry::Header, theme, enable_colors),
        themed_cell("Value".to_string(), ThemeEntry::Header, theme, enable_colors),
    ]);

    let regression = &report.regression;
    let rows = report
        .statistics
        .labelled()
        .into_iter()
        .chain([("Regression Slope", regression.slope), ("Regression Intercept", regression.intercept)]);

    for (label, value) in rows {
        table.add_row(vec![
            themed_cell(label.to_string(), ThemeEntry::StatLabel, theme, enable_colors),
            themed_cell(format!("{:.4}", value), ThemeEntry::StatValue, theme, enable_colors),
        ]);
    }
    table
}

/// Writes the summary table followed by a blank line.
pub fn print_summary_table<W: Write>(
    writer: &mut W,
    report: &AnalysisReport,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let table = build_summary_table(report, theme, enable_colors);
    writeln!(writer, "{}\n", table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use synthstat_core::{run_analysis, AnalysisConfig};

    #[test]
    fn plain_messages_have_no_escape_codes() {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_warn_message(&mut out, "viewer skipped", &theme, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Warning: viewer skipped\n");
    }

    #[test]
    fn coloured_messages_carry_escape_codes() {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_info_message(&mut out, "Figure saved to fig.svg", &theme, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("Figure saved to fig.svg"));
    }

    #[test]
    fn summary_table_lists_statistics_and_fit() {
        let report = run_analysis(&AnalysisConfig::default(), &mut []).unwrap();
        let theme = ThemeStyle::default_theme_map();
        let rendered = build_summary_table(&report, &theme, false).to_string();

        for label in ["Mean of X", "Correlation Coefficient", "Regression Slope", "Regression Intercept"] {
            assert!(rendered.contains(label), "missing {}", label);
        }
    }
}
