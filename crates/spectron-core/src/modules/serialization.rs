//! Text exports of the catalog table and the rendered series.

use crate::domain::{ParameterField, PlotSeries, TableRow, ValidationError, ValidationResult};
use std::fs;
use std::path::Path;

pub fn format_value(value: f64) -> String {
    if value != 0.0 && (value.abs() >= 1.0e6 || value.abs() < 1.0e-4) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}

/// Comma-separated table with one row per molecule under the table's column titles.
pub fn render_table_csv(rows: &[TableRow]) -> String {
    let mut header = vec!["Molecule"];
    header.extend(ParameterField::ALL.map(ParameterField::column_title));

    let mut lines = vec![header.join(",")];
    for row in rows {
        let parameters = row.parameters();
        let mut cells = vec![csv_cell(&row.molecule)];
        cells.extend(ParameterField::ALL.map(|field| format_value(parameters.get(field))));
        lines.push(cells.join(","));
    }
    normalize_text_artifact(&lines.join("\n"))
}

fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Tab-separated columns: the shared x axis followed by one column per series.
pub fn render_series_table(series: &[PlotSeries]) -> ValidationResult<String> {
    let Some(first) = series.first() else {
        return Ok(String::new());
    };

    for entry in series {
        if entry.x != first.x || entry.y.len() != first.x.len() {
            return Err(ValidationError::InconsistentLengths {
                entity: format!("series '{}'", entry.label),
                detail: format!(
                    "x={}, y={}, shared axis={}",
                    entry.x.len(),
                    entry.y.len(),
                    first.x.len()
                ),
            });
        }
    }

    let mut lines = Vec::with_capacity(first.x.len() + 1);
    let mut header = vec!["Frequency (MHz)".to_string()];
    header.extend(series.iter().map(|entry| entry.label.replace('\t', " ")));
    lines.push(header.join("\t"));

    for (index, x) in first.x.iter().enumerate() {
        let mut cells = vec![format_value(*x)];
        cells.extend(series.iter().map(|entry| format_value(entry.y[index])));
        lines.push(cells.join("\t"));
    }
    Ok(normalize_text_artifact(&lines.join("\n")))
}
