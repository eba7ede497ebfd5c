//! CSV loading and normalization.
//!
//! Reads the whole source list into memory before any output is produced.
//! Uses the `csv` crate at the byte-record level so that quoted fields are
//! handled properly and invalid UTF-8 can be dropped instead of failing the
//! run.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::trace;

use crate::classify::{classify_row, is_valid_token, RowClass};
use crate::error::AppError;

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered list of validated domain tokens plus the aggregate skip count.
#[derive(Debug, Clone, Default)]
pub struct DomainList {
    /// Tokens in source order, duplicates preserved.
    pub domains: Vec<String>,
    /// Rows and candidates dropped during normalization (header row excluded).
    pub skipped: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Reads `path` and produces the normalized domain list.
///
/// The first row is discarded when it looks like a header (its leading
/// field, BOM stripped, is a known column name). Every other row contributes
/// at most one candidate: the second field of a `rank,domain` pair, or the
/// only field of a one-column row. Candidates that are empty, purely
/// numeric, or themselves column names are dropped and counted.
///
/// # Errors
///
/// Returns `AppError::InputNotFound` if the file does not exist, or
/// `AppError::InputRead` for any other open/read failure. Malformed CSV
/// records are not errors; they are counted in `DomainList::skipped`.
pub fn load_domains(path: &Path) -> Result<DomainList, AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::InputNotFound {
            path: path.display().to_string(),
        },
        _ => AppError::InputRead {
            path: path.display().to_string(),
            message: e.to_string(),
        },
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut list = DomainList::default();
    let mut first_row = true;

    for result in reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                // An underlying read failure is fatal; a record the parser
                // cannot make sense of is just a skipped row.
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    return Err(AppError::InputRead {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    });
                }
                list.skipped += 1;
                continue;
            }
        };

        let mut fields: Vec<String> = record.iter().map(decode_field).collect();
        if first_row {
            strip_bom(&mut fields);
        }

        let class = classify_row(&fields, first_row);
        first_row = false;

        match class.candidate() {
            Some(token) if is_valid_token(token) => list.domains.push(token.to_owned()),
            Some(token) => {
                trace!(token, "dropped candidate");
                list.skipped += 1;
            }
            None => {
                if class == RowClass::Malformed {
                    list.skipped += 1;
                }
            }
        }
    }

    Ok(list)
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes a raw CSV field as UTF-8, dropping invalid byte sequences.
fn decode_field(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_owned(),
        Err(_) => String::from_utf8_lossy(raw)
            .chars()
            .filter(|c| *c != char::REPLACEMENT_CHARACTER)
            .collect(),
    }
}

/// Strips a UTF-8 BOM from the leading field of the first record so that
/// header detection and token validation see the bare column name.
fn strip_bom(fields: &mut [String]) {
    if let Some(first) = fields.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_owned();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to create a temp file with the given content.
    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content)
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn missing_file_is_input_not_found() {
        let result = load_domains(Path::new("/no/such/file.csv"));
        assert!(matches!(result, Err(AppError::InputNotFound { .. })));
    }

    #[test]
    fn header_row_is_skipped() {
        let file = create_temp_csv(b"domain\ngoogle.com\nexample.org\n");
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["google.com", "example.org"]);
        assert_eq!(list.skipped, 0);
    }

    #[test]
    fn first_row_without_keyword_is_data() {
        let file = create_temp_csv(b"1,google.com\n2,youtube.com\n");
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["google.com", "youtube.com"]);
    }

    #[test]
    fn rank_column_is_discarded() {
        let file = create_temp_csv(b"rank,domain\n1,google.com\n");
        // "rank" is not a header keyword, so the first row is data: its
        // second field "domain" is a keyword and gets dropped.
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["google.com"]);
        assert_eq!(list.skipped, 1);
    }

    #[test]
    fn numeric_and_keyword_candidates_are_counted_not_kept() {
        let file = create_temp_csv(b"domain\n42\nexample.com\nhost\n,\n");
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["example.com"]);
        // "42", "host", and the empty second field of "," are all dropped.
        assert_eq!(list.skipped, 3);
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let file = create_temp_csv(b"b.com\na.com\nb.com\nc.com\n");
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["b.com", "a.com", "b.com", "c.com"]);
    }

    #[test]
    fn fields_are_trimmed() {
        let file = create_temp_csv(b"1,  spaced.net  \n");
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["spaced.net"]);
    }

    #[test]
    fn bom_prefixed_header_is_still_a_header() {
        let file = create_temp_csv(b"\xEF\xBB\xBFdomain\nexample.com\n");
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["example.com"]);
    }

    #[test]
    fn invalid_utf8_bytes_are_ignored() {
        // "exam\xFFple.com" should come through with the bad byte dropped.
        let file = create_temp_csv(b"domain\nexam\xFFple.com\n");
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["example.com"]);
    }

    #[test]
    fn quoted_fields_with_commas_stay_single_tokens() {
        let file = create_temp_csv(b"1,\"weird,name.com\"\n");
        let list = load_domains(file.path()).expect("load failed");
        assert_eq!(list.domains, vec!["weird,name.com"]);
    }

    #[test]
    fn empty_file_yields_empty_list() {
        let file = create_temp_csv(b"");
        let list = load_domains(file.path()).expect("load failed");
        assert!(list.domains.is_empty());
        assert_eq!(list.skipped, 0);
    }

    #[test]
    fn header_only_file_yields_empty_list() {
        let file = create_temp_csv(b"domain\n");
        let list = load_domains(file.path()).expect("load failed");
        assert!(list.domains.is_empty());
        assert_eq!(list.skipped, 0);
    }
}
