//! Delimited two-column observation files.

use crate::domain::{ParseError, ParseResult, Spectrum};
use crate::modules::helpers::{file_stem_label, parse_f64};

/// Parses an observed spectrum. The first two columns of every row are taken
/// as `(x, y)`; further columns are ignored. Cells may be separated by tabs,
/// commas, or runs of whitespace, and the first row may be a header.
pub fn parse_spectrum(source: &str, filename: &str) -> ParseResult<Spectrum> {
    let label = file_stem_label(filename);
    let malformed = |reason: String| ParseError::MalformedSpectrum {
        name: display_name(label),
        reason,
    };

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut seen_content = false;

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim().trim_start_matches('\u{feff}');
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let cells = split_cells(trimmed);
        let first_row = !seen_content;
        seen_content = true;
        let values = match cells.as_slice() {
            [first, second, ..] => (parse_f64(first), parse_f64(second)),
            _ => (None, None),
        };
        match values {
            (Some(frequency), Some(intensity)) => {
                x.push(frequency);
                y.push(intensity);
            }
            _ if first_row => {}
            _ if cells.len() < 2 => {
                return Err(malformed(format!(
                    "line {line_number} has {} column(s), expected at least 2",
                    cells.len()
                )));
            }
            _ => {
                return Err(malformed(format!(
                    "line {line_number} has non-numeric values '{}', '{}'",
                    cells[0], cells[1]
                )));
            }
        }
    }

    if x.is_empty() {
        return Err(malformed("no data rows".to_string()));
    }

    let spectrum = Spectrum::new(x, y, label).map_err(|error| malformed(error.to_string()))?;
    tracing::debug!(
        comment = spectrum.comment(),
        points = spectrum.len(),
        "parsed observed spectrum"
    );
    Ok(spectrum)
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|cell| !cell.is_empty())
        .collect()
}

fn display_name(label: &str) -> String {
    if label.is_empty() {
        Spectrum::DEFAULT_COMMENT.to_string()
    } else {
        label.to_string()
    }
}
