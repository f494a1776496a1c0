// src/process/clean.rs

use crate::process::Table;
use once_cell::sync::Lazy;
use regex::Regex;

/// Header renames, exact match against the source page. The film header
/// carries its citation marker on the page, so it is matched as rendered;
/// headers that do not match are kept as-is.
pub const HEADER_RENAMES: [(&str, &str); 5] = [
    ("Film[30]", "film_name"),
    ("U.S. release date", "us_release_date"),
    ("Director", "director_name"),
    ("Screenwriter(s)", "screen_writer"),
    ("Producer(s)", "producers"),
];

/// Columns whose value spans multiple rows in the source markup.
pub const FORWARD_FILL_COLUMNS: [&str; 2] = ["screen_writer", "producers"];

static CITATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").expect("valid regex"));

/// Remove `[digits]` citation markers. Idempotent: a stripped string is a
/// fixed point.
pub fn strip_citations(text: &str) -> String {
    CITATION_RE.replace_all(text, "").into_owned()
}

/// Canonicalize the extracted film table in place: rename headers,
/// forward-fill the multi-row columns, and strip citation markers from
/// every cell. Never fails; a schema missing an expected column simply
/// skips that column's step.
pub fn clean_film_table(table: &mut Table) {
    for (from, to) in HEADER_RENAMES {
        table.rename_header(from, to);
    }
    for column in FORWARD_FILL_COLUMNS {
        table.forward_fill(column);
    }
    for row in &mut table.rows {
        for cell in row.iter_mut().flatten() {
            if CITATION_RE.is_match(cell) {
                *cell = strip_citations(cell);
            }
        }
    }
}
