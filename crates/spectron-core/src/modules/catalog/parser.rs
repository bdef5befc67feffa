use super::{CATALOG_COLUMN_COUNT, CATALOG_COLUMN_WIDTHS, CATALOG_MIN_LINE_WIDTH};
use crate::domain::{ParseError, ParseResult};
use crate::modules::helpers::parse_f64;
use std::ops::Range;

const FREQUENCY_COLUMN: usize = 0;
const INTENSITY_COLUMN: usize = 2;
const LOWER_ENERGY_COLUMN: usize = 4;

/// The fields of one catalog line that the LTE model consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct CatalogRecord {
    pub(super) frequency: f64,
    pub(super) log_intensity: f64,
    pub(super) lower_energy: f64,
}

pub(super) fn column_ranges() -> [Range<usize>; CATALOG_COLUMN_COUNT] {
    let mut start = 0;
    CATALOG_COLUMN_WIDTHS.map(|width| {
        let range = start..start + width;
        start += width;
        range
    })
}

pub(super) fn parse_records(source: &str, name: &str) -> ParseResult<Vec<CatalogRecord>> {
    let columns = column_ranges();
    let mut records = Vec::new();
    let mut seen_content = false;

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        if !seen_content {
            seen_content = true;
            if is_header_line(line) {
                continue;
            }
        }

        records.push(parse_record(line, line_number, name, &columns)?);
    }

    Ok(records)
}

fn is_header_line(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_none_or(|token| parse_f64(token).is_none())
}

fn parse_record(
    line: &str,
    line_number: usize,
    name: &str,
    columns: &[Range<usize>],
) -> ParseResult<CatalogRecord> {
    let malformed = |reason: String| ParseError::MalformedCatalog {
        name: name.to_string(),
        line: line_number,
        reason,
    };

    if !line.is_ascii() {
        return Err(malformed("line contains non-ASCII characters".to_string()));
    }
    if line.len() < CATALOG_MIN_LINE_WIDTH {
        return Err(malformed(format!(
            "line is {} characters, expected at least {}",
            line.len(),
            CATALOG_MIN_LINE_WIDTH
        )));
    }

    let field = |column: usize, label: &str| -> ParseResult<f64> {
        let raw = &line[columns[column].clone()];
        parse_f64(raw).ok_or_else(|| malformed(format!("invalid {label} field '{}'", raw.trim())))
    };

    Ok(CatalogRecord {
        frequency: field(FREQUENCY_COLUMN, "frequency")?,
        log_intensity: field(INTENSITY_COLUMN, "intensity")?,
        lower_energy: field(LOWER_ENERGY_COLUMN, "lower-state energy")?,
    })
}
