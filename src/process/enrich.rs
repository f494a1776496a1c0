// src/process/enrich.rs

use crate::fetch::EnrichmentRecord;
use crate::process::Table;
use serde_json::Value;

/// Fields kept from a lookup response, paired with their canonical names.
/// Everything else in the response is discarded.
pub const KEPT_FIELDS: [(&str, &str); 10] = [
    ("Title", "film_name"),
    ("Rated", "rated"),
    ("Released", "release_date"),
    ("Runtime", "runtime"),
    ("Genre", "genre"),
    ("Actors", "actors"),
    ("Awards", "awards"),
    ("imdbRating", "imdb_rating"),
    ("BoxOffice", "box_office_collection"),
    ("Type", "type"),
];

fn cell(record: &EnrichmentRecord, field: &str) -> Option<String> {
    match record.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Project raw lookup records onto the kept-field subset under canonical
/// names. Records without a usable identifier cannot participate in the
/// join and are dropped entirely rather than null-filled.
pub fn clean_enrichment(records: &[EnrichmentRecord]) -> Table {
    let mut table = Table::new(KEPT_FIELDS.iter().map(|(_, name)| name.to_string()).collect());
    for record in records {
        if cell(record, "Title").is_none() {
            continue;
        }
        table
            .rows
            .push(KEPT_FIELDS.iter().map(|(field, _)| cell(record, field)).collect());
    }
    table
}
