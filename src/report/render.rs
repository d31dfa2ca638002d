//! Writes the month's report artifacts: one wide CSV plus a pair of HTML
//! tables (chronological and value-sorted) per view.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::extract::MonthSummary;
use super::partition::{ReportRow, ReportView};
use crate::errors::Result;

const VALUE_SORTED_DIR: &str = "value_sorted";
const OVERVIEW_CSV: &str = "overview.csv";

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    date: String,
    category: &'a str,
    amount: f64,
    payer_share: f64,
    recurring: bool,
    date_display: &'a str,
    amount_display: &'a str,
    payer_display: &'a str,
}

/// Writes all artifacts for one month under `dest_root/<label>/`.
///
/// Directory creation is idempotent. Files are written in sequence with no
/// rollback: a failure leaves earlier artifacts intact and later ones absent.
pub fn render_month(
    summary: &MonthSummary,
    views: &[ReportView],
    dest_root: &Path,
) -> Result<PathBuf> {
    let dest = dest_root.join(&summary.label);
    let value_dir = dest.join(VALUE_SORTED_DIR);
    fs::create_dir_all(&dest)?;
    fs::create_dir_all(&value_dir)?;

    write_overview_csv(summary, &dest.join(OVERVIEW_CSV))?;

    for view in views {
        let file_name = format!("{}.html", view.file_stem);
        write_html(view, &view.rows, &dest.join(&file_name))?;
        write_html(view, &view.value_sorted(), &value_dir.join(&file_name))?;
    }

    info!(dest = %dest.display(), views = views.len(), "report artifacts written");
    Ok(dest)
}

/// Full-column machine-readable form: every extracted record,
/// chronological, without the synthetic rows.
fn write_overview_csv(summary: &MonthSummary, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for enriched in &summary.records {
        let record = &enriched.record;
        writer.serialize(CsvRow {
            name: &record.name,
            date: record.date.format("%Y-%m-%d").to_string(),
            category: &record.category,
            amount: record.amount,
            payer_share: record.payer_share,
            recurring: record.recurring,
            date_display: &enriched.date_display,
            amount_display: &enriched.amount_display,
            payer_display: &enriched.payer_display,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Narrow human-readable form: Name / Date / Category / Amount / Payer, with
/// the Category column dropped for per-category views and the Payer column
/// dropped for the non-payer view.
fn write_html(view: &ReportView, rows: &[ReportRow], path: &Path) -> Result<()> {
    let mut html = String::new();
    html.push_str("<table border=\"1\" class=\"report\">\n");
    html.push_str("  <thead>\n    <tr style=\"text-align: center;\">\n");
    for header in header_columns(view) {
        html.push_str(&format!(
            "      <th style=\"min-width: 150px;\">{header}</th>\n"
        ));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in rows {
        html.push_str("    <tr>\n");
        for cell in row_cells(view, row) {
            html.push_str(&format!("      <td>{}</td>\n", escape_html(cell)));
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n</table>\n");

    let mut file = File::create(path)?;
    file.write_all(html.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn header_columns(view: &ReportView) -> Vec<&'static str> {
    let mut headers = vec!["Name", "Date"];
    if view.show_category {
        headers.push("Category");
    }
    headers.push("Amount");
    if view.show_payer {
        headers.push("Payer");
    }
    headers
}

fn row_cells<'a>(view: &ReportView, row: &'a ReportRow) -> Vec<&'a str> {
    let mut cells = vec![row.name.as_str(), row.date_display.as_str()];
    if view.show_category {
        cells.push(row.category.as_str());
    }
    cells.push(row.amount_display.as_str());
    if view.show_payer {
        cells.push(row.payer_display.as_str());
    }
    cells
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseRecord, RecordId};
    use crate::format::{format_currency, format_date};
    use crate::month::MonthWindow;
    use crate::report::extract::EnrichedRecord;
    use crate::report::partition::partition;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn summary() -> MonthSummary {
        let window = MonthWindow::new(2022, 1).unwrap();
        let record = ExpenseRecord {
            id: RecordId(0),
            name: "Fish & chips".into(),
            date: NaiveDate::from_ymd_opt(2022, 1, 7).unwrap(),
            category: "TAKE".into(),
            amount: -18.5,
            payer_share: 0.0,
            recurring: false,
        };
        MonthSummary {
            window,
            label: window.label(),
            records: vec![EnrichedRecord {
                date_display: format_date(record.date),
                amount_display: format_currency(record.amount),
                payer_display: format_currency(record.payer_share),
                record,
            }],
        }
    }

    #[test]
    fn writes_expected_artifact_tree() {
        let temp = TempDir::new().unwrap();
        let summary = summary();
        let views = partition(&summary);
        let dest = render_month(&summary, &views, temp.path()).unwrap();

        assert_eq!(dest, temp.path().join("2022-01_January"));
        assert!(dest.join("overview.csv").exists());
        assert!(dest.join("overview.html").exists());
        assert!(dest.join("value_sorted/overview.html").exists());
        assert!(dest.join("take.html").exists());
        assert!(dest.join("value_sorted/take.html").exists());
        assert!(dest.join("non-payer.html").exists());

        // Repeat runs must be safe: directories already exist.
        render_month(&summary, &views, temp.path()).unwrap();
    }

    #[test]
    fn csv_carries_the_full_column_set_without_synthetic_rows() {
        let temp = TempDir::new().unwrap();
        let summary = summary();
        let views = partition(&summary);
        let dest = render_month(&summary, &views, temp.path()).unwrap();

        let data = fs::read_to_string(dest.join("overview.csv")).unwrap();
        let mut lines = data.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,date,category,amount,payer_share,recurring,date_display,amount_display,payer_display"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Fish & chips"));
        assert!(row.contains("2022-01-07"));
        assert!(row.contains("-£18.50"));
        assert!(!data.contains("TOTAL"));
    }

    #[test]
    fn html_escapes_text_and_drops_columns_per_view() {
        let temp = TempDir::new().unwrap();
        let summary = summary();
        let views = partition(&summary);
        let dest = render_month(&summary, &views, temp.path()).unwrap();

        let overview = fs::read_to_string(dest.join("overview.html")).unwrap();
        assert!(overview.contains("Fish &amp; chips"));
        assert!(overview.contains("<th style=\"min-width: 150px;\">Payer</th>"));

        let category = fs::read_to_string(dest.join("take.html")).unwrap();
        assert!(!category.contains(">Category<"));

        let non_payer = fs::read_to_string(dest.join("non-payer.html")).unwrap();
        assert!(!non_payer.contains(">Payer<"));
        assert!(non_payer.contains(">Category<"));
    }
}
