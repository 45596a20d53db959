//! Detection summary tables printed after a redaction or a scan.

use comfy_table::{presets, Cell, Color, Table};
use std::io::{self, Write};

use autoredact_core::{DetectionBreakdown, ReportBucket};

use crate::ui::output_format;
use crate::ui::theme::{ThemeColor, ThemeEntry, ThemeMap};

/// Report rows in display order.
pub const BREAKDOWN_ROWS: [(ReportBucket, &str); 5] = [
    (ReportBucket::Emails, "Emails Found"),
    (ReportBucket::Ips, "IPs Found"),
    (ReportBucket::CreditCards, "Credit Cards Found"),
    (ReportBucket::Secrets, "Secrets Found"),
    (ReportBucket::Pii, "PII/Other Found"),
];

fn table_color(color: &ThemeColor) -> Color {
    let ThemeColor::Named(name) = color;
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "brightblack" => Color::DarkGrey,
        "brightred" => Color::Red,
        "brightgreen" => Color::Green,
        "brightyellow" => Color::Yellow,
        "brightblue" => Color::Blue,
        "brightmagenta" => Color::Magenta,
        "brightcyan" => Color::Cyan,
        _ => Color::White,
    }
}

fn themed_cell(text: impl ToString, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> Cell {
    let cell = Cell::new(text);
    if !supports_color {
        return cell;
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => cell.fg(table_color(color)),
        None => cell,
    }
}

fn new_table(supports_color: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    if !supports_color {
        table.force_no_tty();
    }
    table
}

/// One row per report bucket plus a total.
pub fn breakdown_table(breakdown: &DetectionBreakdown, theme: &ThemeMap, supports_color: bool) -> Table {
    let mut table = new_table(supports_color);
    table.set_header(vec!["Category", "Count"]);
    for (bucket, label) in BREAKDOWN_ROWS {
        table.add_row(vec![
            themed_cell(label, ThemeEntry::SummaryCategory, theme, supports_color),
            themed_cell(breakdown.get(bucket), ThemeEntry::SummaryCount, theme, supports_color),
        ]);
    }
    table.add_row(vec![
        themed_cell("Total", ThemeEntry::SummaryCategory, theme, supports_color),
        themed_cell(breakdown.total(), ThemeEntry::SummaryCount, theme, supports_color),
    ]);
    table
}

/// Prints the summary of a single redaction pass.
pub fn print_breakdown<W: Write>(
    writer: &mut W,
    breakdown: &DetectionBreakdown,
    region_count: usize,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    output_format::print_header(writer, "\n--- Redaction Summary ---", theme, supports_color)?;
    if breakdown.total() == 0 {
        return output_format::print_info_message(writer, "No sensitive data detected.", theme, supports_color);
    }
    writeln!(writer, "{}", breakdown_table(breakdown, theme, supports_color))?;
    output_format::print_info_message(
        writer,
        &format!("{} region(s) to redact.", region_count),
        theme,
        supports_color,
    )
}

/// Prints one row per scanned page followed by the combined breakdown.
pub fn print_scan_report<W: Write>(
    writer: &mut W,
    pages: &[(String, DetectionBreakdown)],
    totals: &DetectionBreakdown,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    output_format::print_header(writer, "\n--- Scan Report ---", theme, supports_color)?;

    let mut table = new_table(supports_color);
    let mut header = vec!["Page".to_string()];
    header.extend(BREAKDOWN_ROWS.iter().map(|(_, label)| label.trim_end_matches(" Found").to_string()));
    header.push("Total".to_string());
    table.set_header(header);

    for (page, breakdown) in pages {
        let mut row = vec![themed_cell(page, ThemeEntry::SummaryCategory, theme, supports_color)];
        row.extend(
            BREAKDOWN_ROWS
                .iter()
                .map(|(bucket, _)| themed_cell(breakdown.get(*bucket), ThemeEntry::SummaryCount, theme, supports_color)),
        );
        row.push(themed_cell(breakdown.total(), ThemeEntry::SummaryCount, theme, supports_color));
        table.add_row(row);
    }
    writeln!(writer, "{}", table)?;

    output_format::print_header(writer, "Totals", theme, supports_color)?;
    writeln!(writer, "{}", breakdown_table(totals, theme, supports_color))
}
