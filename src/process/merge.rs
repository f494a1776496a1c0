// src/process/merge.rs

use crate::process::Table;
use std::collections::HashMap;

/// Written into every cell that ends up with no value after the join.
pub const NOT_AVAILABLE: &str = "N/A";

/// Left-outer join of `left` and `right` on the `key` column.
///
/// Every left row appears exactly once in the output, matched or not. The
/// output columns are the left columns followed by the right columns minus
/// the key. Duplicate keys on the right: the first occurrence wins, so left
/// cardinality is always preserved. A left row whose key cell is null never
/// matches.
pub fn left_join(left: &Table, right: &Table, key: &str) -> Option<Table> {
    let left_key = left.column_index(key)?;
    let right_key = right.column_index(key)?;

    let mut index: HashMap<&str, &Vec<Option<String>>> = HashMap::new();
    for row in &right.rows {
        if let Some(k) = row[right_key].as_deref() {
            index.entry(k).or_insert(row);
        }
    }

    let mut headers = left.headers.clone();
    headers.extend(
        right
            .headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != right_key)
            .map(|(_, h)| h.clone()),
    );

    let right_width = right.headers.len() - 1;
    let mut merged = Table::new(headers);
    for row in &left.rows {
        let mut out = row.clone();
        match row[left_key].as_deref().and_then(|k| index.get(k)) {
            Some(matched) => out.extend(
                matched
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != right_key)
                    .map(|(_, c)| c.clone()),
            ),
            None => out.extend(std::iter::repeat(None).take(right_width)),
        }
        merged.rows.push(out);
    }
    Some(merged)
}

/// Replace every remaining null cell with `sentinel`. The merged artifact
/// must contain no nulls.
pub fn fill_missing(table: &mut Table, sentinel: &str) {
    for row in &mut table.rows {
        for cell in row {
            if cell.is_none() {
                *cell = Some(sentinel.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn films() -> Table {
        let mut table = Table::new(vec!["film_name".into(), "director_name".into()]);
        table.rows = vec![
            vec![Some("Film A".to_string()), Some("Jon X".to_string())],
            vec![Some("Film B".to_string()), None],
            vec![Some("Film C".to_string()), Some("Joe Y".to_string())],
        ];
        table
    }

    fn enrichment() -> Table {
        let mut table = Table::new(vec!["film_name".into(), "rated".into()]);
        table.rows = vec![vec![Some("Film A".to_string()), Some("PG-13".to_string())]];
        table
    }

    #[test]
    fn preserves_left_cardinality() {
        let merged = left_join(&films(), &enrichment(), "film_name").unwrap();
        assert_eq!(merged.rows.len(), 3);
        assert_eq!(
            merged.headers,
            vec!["film_name", "director_name", "rated"]
        );
    }

    #[test]
    fn unmatched_rows_get_nulls_then_sentinel() {
        let mut merged = left_join(&films(), &enrichment(), "film_name").unwrap();
        assert_eq!(merged.rows[1], vec![Some("Film B".to_string()), None, None]);

        fill_missing(&mut merged, NOT_AVAILABLE);
        assert_eq!(
            merged.rows[1],
            vec![
                Some("Film B".to_string()),
                Some("N/A".to_string()),
                Some("N/A".to_string())
            ]
        );
        assert!(merged.rows.iter().all(|r| r.iter().all(|c| c.is_some())));
    }

    #[test]
    fn first_right_occurrence_wins_on_duplicate_keys() {
        let mut right = enrichment();
        right.rows.push(vec![
            Some("Film A".to_string()),
            Some("R".to_string()),
        ]);
        let merged = left_join(&films(), &right, "film_name").unwrap();
        assert_eq!(merged.rows.len(), 3);
        assert_eq!(merged.rows[0][2], Some("PG-13".to_string()));
    }

    #[test]
    fn null_left_key_never_matches() {
        let mut left = films();
        left.rows[0][0] = None;
        let merged = left_join(&left, &enrichment(), "film_name").unwrap();
        assert_eq!(merged.rows[0][2], None);
    }

    #[test]
    fn missing_key_column_yields_none() {
        let no_key = Table::new(vec!["other".into()]);
        assert!(left_join(&no_key, &enrichment(), "film_name").is_none());
    }
}
