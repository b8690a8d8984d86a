//! Shaping report rows for CSV export.
//!
//! Cells come out ready to be joined with commas. Writing them anywhere is
//! left to the caller.

use std::borrow::Cow;

use serde::Serialize;

use crate::aggregate::ReportRow;

/// Column titles, in export order.
pub const HEADER: [&str; 6] = [
    "User name",
    "Project name",
    "Issue",
    "Time",
    "Start date",
    "End date",
];

/// One exported line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub username: String,
    pub project_name: String,
    pub issue: String,
    pub time: String,
    pub start_date: String,
    pub end_date: String,
}

impl ExportRow {
    pub fn from_report_row(row: &ReportRow) -> Self {
        Self {
            username: row.username.replace(',', ";"),
            project_name: row.project_name.replace(',', ";"),
            issue: issue_cell(&row.issue),
            time: row.duration_display.clone(),
            start_date: row.start_display.clone(),
            end_date: row.end_display.clone(),
        }
    }

    pub fn fields(&self) -> [&str; 6] {
        [
            &self.username,
            &self.project_name,
            &self.issue,
            &self.time,
            &self.start_date,
            &self.end_date,
        ]
    }

    pub fn to_csv_line(&self) -> String {
        self.fields().join(",")
    }
}

/// Percent-decodes an issue title and quotes it for CSV.
///
/// Commas become semicolons and embedded quotes are doubled. An empty title
/// stays an empty cell.
fn issue_cell(issue: &str) -> String {
    if issue.is_empty() {
        return String::new();
    }
    let decoded = urlencoding::decode(issue).unwrap_or_else(|err| {
        tracing::warn!(
            issue,
            error = %err,
            "issue is not valid percent-encoded UTF-8, exporting as-is"
        );
        Cow::Borrowed(issue)
    });
    format!("\"{}\"", decoded.replace(',', ";").replace('"', "\"\""))
}

/// Maps report rows to export rows, keeping their order.
pub fn export_rows(report: &[ReportRow]) -> Vec<ExportRow> {
    report.iter().map(ExportRow::from_report_row).collect()
}

/// Header line followed by one line per row, newline-terminated.
pub fn render_csv(rows: &[ExportRow]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_csv_line());
        out.push('\n');
    }
    out
}
