/// Final path component of an uploaded filename. Browsers on Windows may send
/// backslash-separated paths, so both separators are honored.
pub(crate) fn file_name(filename: &str) -> &str {
    filename
        .trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
}

/// Filename with any directory and the last extension removed. Dotfiles keep
/// their leading dot.
pub(crate) fn file_stem_label(filename: &str) -> &str {
    let name = file_name(filename);
    match name.rfind('.') {
        Some(index) if index > 0 => &name[..index],
        _ => name,
    }
}

/// Lowercased last extension of an uploaded filename.
pub(crate) fn file_extension(filename: &str) -> Option<String> {
    let name = file_name(filename);
    match name.rfind('.') {
        Some(index) if index > 0 && index + 1 < name.len() => {
            Some(name[index + 1..].to_ascii_lowercase())
        }
        _ => None,
    }
}

pub(crate) fn parse_f64(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::{file_extension, file_name, file_stem_label, parse_f64};

    #[test]
    fn stems_strip_directories_and_extensions() {
        assert_eq!(file_stem_label("ch3cn.cat"), "ch3cn");
        assert_eq!(file_stem_label("/data/catalogs/HC3N.cat"), "HC3N");
        assert_eq!(file_stem_label(r"C:\uploads\obs.2019.txt"), "obs.2019");
        assert_eq!(file_stem_label("no_extension"), "no_extension");
        assert_eq!(file_stem_label(".hidden"), ".hidden");
        assert_eq!(file_stem_label(""), "");
        assert_eq!(file_name("dir/"), "");
    }

    #[test]
    fn extensions_are_lowercased() {
        assert_eq!(file_extension("CH3OH.CAT").as_deref(), Some("cat"));
        assert_eq!(file_extension("spectrum.tsv").as_deref(), Some("tsv"));
        assert_eq!(file_extension("trailing."), None);
        assert_eq!(file_extension("plain"), None);
    }

    #[test]
    fn numeric_tokens_tolerate_padding() {
        assert_eq!(parse_f64("  -12.5000"), Some(-12.5));
        assert_eq!(parse_f64("1.0E+03"), Some(1000.0));
        assert_eq!(parse_f64("abc"), None);
    }
}
