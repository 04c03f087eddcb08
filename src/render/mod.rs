use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::db::rowset::{Rowset, Value};
use crate::error::Result;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
            ExportFormat::Html => "HTML",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "html" => Some(ExportFormat::Html),
            _ => None,
        }
    }
}

/// Render a rowset as an aligned text table with a row-count footer.
pub fn format_table(rowset: &Rowset) -> String {
    let mut widths: Vec<usize> = rowset.columns.iter().map(|c| c.len()).collect();
    let cells: Vec<Vec<String>> = rowset
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            if cell.len() > widths[idx] {
                widths[idx] = cell.len();
            }
        }
    }

    let mut out = String::new();
    for (idx, column) in rowset.columns.iter().enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{:<width$}", column, width = widths[idx]));
    }
    out.push('\n');
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            if idx > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{:<width$}", cell, width = widths[idx]));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "({} row{})\n",
        rowset.len(),
        if rowset.len() == 1 { "" } else { "s" }
    ));
    out
}

/// Write a rowset to a file in the requested format.
pub fn write_rowset(rowset: &Rowset, output_path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Json => write_json(rowset, output_path),
        ExportFormat::Csv => write_csv(rowset, output_path),
        ExportFormat::Html => write_html(rowset, output_path),
    }
}

fn write_json(rowset: &Rowset, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(rowset)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

fn write_csv(rowset: &Rowset, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(&rowset.columns)?;
    for row in &rowset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_html(rowset: &Rowset, output_path: &Path) -> Result<()> {
    let mut html = String::new();

    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Socialens Report Export</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            background: #1a1a1a;
            color: #e0e0e0;
        }
        h1 {
            color: #4fc3f7;
            border-bottom: 2px solid #4fc3f7;
            padding-bottom: 10px;
        }
        .stats {
            background: #2d2d2d;
            padding: 15px;
            border-radius: 8px;
            margin-bottom: 20px;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
        }
        th, td {
            padding: 10px;
            text-align: left;
            border-bottom: 1px solid #404040;
        }
        th {
            background: #2d2d2d;
            color: #4fc3f7;
        }
        tr:hover {
            background: #333;
        }
        td.null {
            color: #888;
            font-style: italic;
        }
    </style>
</head>
<body>
    <h1>Socialens Report Export</h1>
"#,
    );

    html.push_str(&format!(
        r#"    <div class="stats">
        <strong>Total Rows:</strong> {}
    </div>
    <table>
        <tr>
"#,
        rowset.len()
    ));

    for column in &rowset.columns {
        html.push_str(&format!(
            "            <th>{}</th>\n",
            html_escape(column)
        ));
    }
    html.push_str("        </tr>\n");

    for row in &rowset.rows {
        html.push_str("        <tr>\n");
        for value in row {
            match value {
                Value::Null => html.push_str("            <td class=\"null\">null</td>\n"),
                other => html.push_str(&format!(
                    "            <td>{}</td>\n",
                    html_escape(&other.to_string())
                )),
            }
        }
        html.push_str("        </tr>\n");
    }

    html.push_str(
        r#"    </table>
</body>
</html>
"#,
    );

    let mut file = File::create(output_path)?;
    file.write_all(html.as_bytes())?;
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
