//! Raw upload handling: payload decoding, extension classification, and
//! dispatch to the spectrum and catalog parsers.

use crate::domain::{Catalog, LteParameters, ParseError, ParseResult, Spectrum, UploadKind};
use crate::modules::catalog::parse_catalog;
use crate::modules::helpers::{file_extension, file_name};
use crate::modules::spectrum::parse_spectrum;
use base64::{Engine as _, engine::general_purpose::STANDARD};

const DATA_URL_PREFIX: &[u8] = b"data:";
const BASE64_MARKER: &str = ";base64";
const SPECTRUM_EXTENSIONS: [&str; 5] = ["txt", "dat", "tsv", "csv", "spec"];
const CATALOG_EXTENSIONS: [&str; 1] = ["cat"];

/// One uploaded file as delivered by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub contents: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Upload {
    Spectrum(Spectrum),
    Catalog(Catalog),
}

impl Upload {
    pub const fn kind(&self) -> UploadKind {
        match self {
            Self::Spectrum(_) => UploadKind::Spectrum,
            Self::Catalog(_) => UploadKind::Catalog,
        }
    }
}

/// Result of one file in a catalog batch.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub filename: String,
    pub result: ParseResult<Catalog>,
}

/// Decodes an upload payload to text.
///
/// `data:[<mime>][;base64],<payload>` URLs (as produced by browser file
/// pickers) are unwrapped first; anything else is taken as raw bytes. A
/// leading UTF-8 byte-order mark is dropped.
pub fn decode_upload(raw: &[u8], filename: &str) -> ParseResult<String> {
    let invalid = |reason: String| ParseError::InvalidEncoding {
        name: file_name(filename).to_string(),
        reason,
    };

    let bytes = if raw.starts_with(DATA_URL_PREFIX) {
        decode_data_url(raw).map_err(invalid)?
    } else {
        raw.to_vec()
    };

    let text = String::from_utf8(bytes)
        .map_err(|error| invalid(format!("payload is not valid UTF-8: {error}")))?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn decode_data_url(raw: &[u8]) -> Result<Vec<u8>, String> {
    let comma = raw
        .iter()
        .position(|byte| *byte == b',')
        .ok_or_else(|| "data URL has no ',' separator".to_string())?;
    let header = std::str::from_utf8(&raw[..comma])
        .map_err(|_| "data URL header is not valid UTF-8".to_string())?;
    let payload = &raw[comma + 1..];

    if !header.ends_with(BASE64_MARKER) {
        return Ok(payload.to_vec());
    }

    let compact: Vec<u8> = payload
        .iter()
        .copied()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map_err(|error| format!("invalid base64 payload: {error}"))
}

/// Chooses the parser for an upload from its file extension.
pub fn classify_upload(filename: &str) -> ParseResult<UploadKind> {
    let extension = file_extension(filename);
    match extension.as_deref() {
        Some(ext) if CATALOG_EXTENSIONS.contains(&ext) => Ok(UploadKind::Catalog),
        Some(ext) if SPECTRUM_EXTENSIONS.contains(&ext) => Ok(UploadKind::Spectrum),
        _ => Err(ParseError::UnsupportedUpload {
            name: file_name(filename).to_string(),
        }),
    }
}

pub fn upload_spectrum(raw: &[u8], filename: &str) -> ParseResult<Spectrum> {
    let text = decode_upload(raw, filename)?;
    parse_spectrum(&text, filename)
}

pub fn upload_catalog(
    raw: &[u8],
    filename: &str,
    defaults: LteParameters,
) -> ParseResult<Catalog> {
    let text = decode_upload(raw, filename)?;
    parse_catalog(&text, filename, defaults)
}

pub fn parse_upload(raw: &[u8], filename: &str, defaults: LteParameters) -> ParseResult<Upload> {
    match classify_upload(filename)? {
        UploadKind::Spectrum => upload_spectrum(raw, filename).map(Upload::Spectrum),
        UploadKind::Catalog => upload_catalog(raw, filename, defaults).map(Upload::Catalog),
    }
}

/// Parses every file independently; one failure never hides the others.
pub fn upload_catalog_batch(files: &[UploadFile], defaults: LteParameters) -> Vec<UploadOutcome> {
    files
        .iter()
        .map(|file| {
            let result = upload_catalog(&file.contents, &file.filename, defaults);
            if let Err(error) = &result {
                tracing::warn!(filename = %file.filename, %error, "catalog upload rejected");
            }
            UploadOutcome {
                filename: file.filename.clone(),
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        Upload, UploadFile, classify_upload, decode_upload, parse_upload, upload_catalog_batch,
    };
    use crate::domain::{LteParameters, ParseError, UploadKind};
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    const CATALOG_LINE: &str =
        "    9097.0344  0.0500 -6.1074 3    0.0000  3 -510041404 1 1 0       0 0 0       ";

    #[test]
    fn plain_bytes_pass_through() {
        let text = decode_upload(b"1 2\n3 4\n", "obs.txt").expect("plain text decodes");
        assert_eq!(text, "1 2\n3 4\n");
    }

    #[test]
    fn base64_data_urls_are_unwrapped() {
        let url = format!(
            "data:text/plain;base64,{}",
            STANDARD.encode("\u{feff}100 0.5\n101 0.7\n")
        );
        let text = decode_upload(url.as_bytes(), "obs.txt").expect("data URL decodes");
        assert_eq!(text, "100 0.5\n101 0.7\n");

        let unencoded = decode_upload(b"data:text/plain,1 2", "obs.txt").expect("decodes");
        assert_eq!(unencoded, "1 2");
    }

    #[test]
    fn broken_payloads_are_invalid_encoding() {
        let cases: [&[u8]; 3] = [
            b"data:text/plain;base64,***",
            b"data:text/plain;base64",
            &[0xff, 0xfe, 0x00],
        ];
        for raw in cases {
            assert!(matches!(
                decode_upload(raw, "dir/obs.txt"),
                Err(ParseError::InvalidEncoding { ref name, .. }) if name == "obs.txt"
            ));
        }
    }

    #[test]
    fn classification_is_keyed_on_extension() {
        assert_eq!(classify_upload("HC3N.CAT"), Ok(UploadKind::Catalog));
        for name in ["a.txt", "b.dat", "c.tsv", "d.csv", "e.spec"] {
            assert_eq!(classify_upload(name), Ok(UploadKind::Spectrum));
        }
        for name in ["image.png", "noext", "trailing."] {
            assert!(matches!(
                classify_upload(name),
                Err(ParseError::UnsupportedUpload { .. })
            ));
        }
    }

    #[test]
    fn parse_upload_dispatches_by_kind() {
        let spectrum = parse_upload(b"1 2\n", "obs.csv", LteParameters::default())
            .expect("spectrum upload parses");
        assert_eq!(spectrum.kind(), UploadKind::Spectrum);

        let catalog = parse_upload(CATALOG_LINE.as_bytes(), "hc3n.cat", LteParameters::default())
            .expect("catalog upload parses");
        match catalog {
            Upload::Catalog(catalog) => assert_eq!(catalog.molecule(), "hc3n"),
            other => panic!("unexpected upload {other:?}"),
        }
    }

    #[test]
    fn batch_reports_each_file() {
        let files = vec![
            UploadFile::new("good.cat", CATALOG_LINE),
            UploadFile::new("short.cat", "   100.0000  0.0500\n"),
            UploadFile::new("empty.cat", ""),
        ];
        let outcomes = upload_catalog_batch(&files, LteParameters::default());

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(ParseError::MalformedCatalog { line: 1, .. })
        ));
        assert!(matches!(
            outcomes[2].result,
            Err(ParseError::EmptyInput { .. })
        ));
        assert_eq!(outcomes[2].filename, "empty.cat");
    }
}
