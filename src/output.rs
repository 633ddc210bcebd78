//! Output formatting and persistence for depth reports.
//!
//! Supports pretty-printing, JSON serialization, CSV and a standalone HTML page.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::present::REPORT_DATE_FORMAT;
use crate::analyzers::types::ReportTable;
use csv::WriterBuilder;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fs::{self, File};
use std::path::Path;

pub const DEFAULT_CSS_FILE: &str = "simple_table.css";
pub const DEFAULT_TITLE: &str = "Performance Analysis";

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(table: &ReportTable) {
    debug!("{:#?}", table);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(table: &ReportTable) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}

/// Writes the report to a CSV file, replacing any existing file.
///
/// The header row is always written, even for an empty report.
pub fn write_report_csv(path: impl AsRef<Path>, table: &ReportTable) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = table.len(), "Writing CSV report");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;

    Ok(())
}

/// Renders the report as an HTML `<table class="styled-table">`.
pub fn render_html_table(table: &ReportTable) -> String {
    let mut html = String::from("<table class=\"styled-table\">\n  <thead>\n    <tr>");
    for column in &table.columns {
        html.push_str(&format!("<th>{}</th>", encode_text(column)));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");

    for row in &table.rows {
        html.push_str("    <tr>");
        for cell in row.cells() {
            html.push_str(&format!("<td>{}</td>", encode_text(&cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}

/// Renders a complete HTML page around the report table.
///
/// `title` names the page and, suffixed with "Results", its heading.
pub fn render_html_report(table: &ReportTable, title: &str, css_file: &str) -> String {
    let (from, to) = match table.date_range() {
        Some((min, max)) => (
            min.format(REPORT_DATE_FORMAT).to_string(),
            max.format(REPORT_DATE_FORMAT).to_string(),
        ),
        None => ("N/A".to_string(), "N/A".to_string()),
    };

    format!(
        "<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <link rel=\"stylesheet\" type=\"text/css\" href=\"{css}\">
</head>
<body>
    <h1>{title} Results</h1>
    <p>Data from {from} to {to}</p>
{table}
</body>
</html>
",
        title = encode_text(title),
        css = encode_double_quoted_attribute(css_file),
        table = render_html_table(table),
    )
}

/// Writes the HTML page to `path`.
pub fn write_html_report(
    path: impl AsRef<Path>,
    table: &ReportTable,
    title: &str,
    css_file: &str,
) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_html_report(table, title, css_file))?;
    info!(path = %path.display(), title, css_file, "HTML report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::build_report;
    use crate::parser::{NormalizeOptions, RawRow};

    fn sample_table() -> ReportTable {
        let rows = vec![
            RawRow::new("Parliament Hill, GB", "27:57", "01 Jan 24"),
            RawRow::new("Parliament Hill, GB", "28:30", "01 Jan 24"),
            RawRow::new("Battersea Park", "31:10", "02 Jan 24"),
        ];
        build_report(&rows, &NormalizeOptions::default()).unwrap()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_table());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_table()).unwrap();
    }

    #[test]
    fn test_write_report_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        write_report_csv(&path, &sample_table()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Venue,Country,Fastest,< 28,< 29,< 30,< 31,< 32");
        assert_eq!(lines[1], "01 Jan 2024,Parliament Hill,GB,27:57,1,2,2,2,2");
        assert_eq!(lines[2], "02 Jan 2024,Battersea Park,UK,31:10,0,0,0,0,1");
    }

    #[test]
    fn test_write_report_csv_empty_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_report_csv(&path, &ReportTable::empty()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "Date,Venue,Country,Fastest");
    }

    #[test]
    fn test_render_html_escapes_labels() {
        let html = render_html_table(&sample_table());
        assert!(html.contains("<th>&lt; 28</th>"));
        assert!(html.contains("<td>Parliament Hill</td>"));
        assert!(!html.contains("<th>< 28</th>"));
    }

    #[test]
    fn test_render_html_report_date_range() {
        let html = render_html_report(&sample_table(), DEFAULT_TITLE, DEFAULT_CSS_FILE);
        assert!(html.contains("Data from 01 Jan 2024 to 02 Jan 2024"));
        assert!(html.contains("href=\"simple_table.css\""));
        assert!(html.contains("<title>Performance Analysis</title>"));
        assert!(html.contains("<h1>Performance Analysis Results</h1>"));
    }

    #[test]
    fn test_render_html_report_custom_title() {
        let html = render_html_report(&sample_table(), "Men's 10K 2024 & <Road>", DEFAULT_CSS_FILE);
        assert!(html.contains("<title>Men's 10K 2024 &amp; &lt;Road&gt;</title>"));
        assert!(html.contains("<h1>Men's 10K 2024 &amp; &lt;Road&gt; Results</h1>"));
    }

    #[test]
    fn test_render_html_report_quoted_css_path() {
        let html = render_html_report(&sample_table(), DEFAULT_TITLE, "styles/\"odd\".css");
        assert!(html.contains("href=\"styles/&quot;odd&quot;.css\""));
        assert!(!html.contains("\"odd\""));
    }

    #[test]
    fn test_render_html_report_empty() {
        let html = render_html_report(&ReportTable::empty(), DEFAULT_TITLE, DEFAULT_CSS_FILE);
        assert!(html.contains("Data from N/A to N/A"));
        assert!(html.contains("<th>Fastest</th>"));
    }

    #[test]
    fn test_write_html_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&path, &sample_table(), DEFAULT_TITLE, "custom.css").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains("custom.css"));
    }
}
