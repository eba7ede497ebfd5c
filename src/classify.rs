//! Row classification for domain list CSVs.
//!
//! Source lists come in two shapes: `rank,domain` pairs (vendor top-N
//! exports) and bare one-column lists, optionally headed by a column-name
//! row. Each row is tagged with its shape by a pure function; filtering the
//! tagged rows is a separate, deterministic step.

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Column names (lowercase) that mark the first row as a header.
pub const HEADER_KEYWORDS: &[&str] = &["domain", "url", "host", "ip", "target", "address", "site"];

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Shape of a single CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClass {
    /// First row whose leading field is a known column name; carries no token.
    Header,
    /// A `rank,domain` pair. The rank column is kept for inspection but is
    /// never written to output.
    Indexed { index: String, domain: String },
    /// Single-column row; the field itself is the candidate.
    Bare { domain: String },
    /// Row with no fields at all.
    Malformed,
}

impl RowClass {
    /// The candidate token this row contributes, if any.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            RowClass::Indexed { domain, .. } | RowClass::Bare { domain } => Some(domain),
            RowClass::Header | RowClass::Malformed => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Returns true if `field` (trimmed, lowercased) is a known header column name.
pub fn is_header_keyword(field: &str) -> bool {
    let lower = field.trim().to_ascii_lowercase();
    HEADER_KEYWORDS.contains(&lower.as_str())
}

/// Classifies one row into its shape.
///
/// Header detection applies only to the first row of the file. Rows with two
/// or more fields are assumed to be `rank,domain` pairs; the second field is
/// the candidate. One-field rows contribute the field itself.
pub fn classify_row(fields: &[String], first_row: bool) -> RowClass {
    let Some(first) = fields.first() else {
        return RowClass::Malformed;
    };

    if first_row && is_header_keyword(first) {
        return RowClass::Header;
    }

    if fields.len() >= 2 {
        RowClass::Indexed {
            index: first.trim().to_owned(),
            domain: fields[1].trim().to_owned(),
        }
    } else {
        RowClass::Bare {
            domain: first.trim().to_owned(),
        }
    }
}

/// Returns true if a candidate survives filtering: non-empty, not purely
/// decimal digits, and not itself a header column name.
pub fn is_valid_token(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }
    if candidate.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    !is_header_keyword(candidate)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
