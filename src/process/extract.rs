// src/process/extract.rs

use crate::error::ExtractionError;
use crate::process::Table;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Only the leading film tables are relevant; trailing tables on the page
/// (recurring cast, box office summaries) are skipped.
pub const TABLE_FRAGMENT_CUTOFF: usize = 7;

/// Inline annotations like "(2-film re-release)" are presentation, not data.
static PARENTHETICAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").expect("valid regex"));

fn header_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().replace('\n', "")
}

fn row_header_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().replace('\n', "")
}

fn data_cell_text(cell: ElementRef) -> String {
    let text = cell
        .text()
        .collect::<String>()
        .replace('\n', "")
        .replace('\u{a0}', " ");
    PARENTHETICAL_RE.replace_all(&text, "").into_owned()
}

/// Pad short rows with nulls and drop trailing cells from long ones so that
/// every row is exactly `width` cells. Deliberately lossy: trailing
/// unexpected cells are markup artifacts, not data.
pub fn align_rows(mut rows: Vec<Vec<Option<String>>>, width: usize) -> Vec<Vec<Option<String>>> {
    for row in &mut rows {
        row.resize(width, None);
    }
    rows
}

/// Parse the film tables out of `html` into one rectangular record set.
///
/// The column schema comes from the header row of the *first* `wikitable`
/// fragment only; records come from the first [`TABLE_FRAGMENT_CUTOFF`]
/// fragments. Within a fragment, each `th[scope="row"]` cell starts a
/// record: its text is the identifier at position 0 and the `td` siblings to
/// its right form the body.
pub fn extract_film_table(html: &str) -> Result<Table, ExtractionError> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table.wikitable").expect("table selector should be valid");
    let col_sel = Selector::parse(r#"th[scope="col"]"#).expect("column selector should be valid");
    let row_sel = Selector::parse(r#"th[scope="row"]"#).expect("row selector should be valid");

    let fragments: Vec<ElementRef> = document.select(&table_sel).collect();
    let first = fragments.first().ok_or(ExtractionError::NoTables)?;

    let headers: Vec<String> = first.select(&col_sel).map(header_text).collect();
    if headers.is_empty() {
        return Err(ExtractionError::EmptyHeader);
    }

    let mut rows = Vec::new();
    for fragment in fragments.iter().take(TABLE_FRAGMENT_CUTOFF) {
        for row_header in fragment.select(&row_sel) {
            let mut row = vec![Some(row_header_text(row_header))];
            row.extend(
                row_header
                    .next_siblings()
                    .filter_map(ElementRef::wrap)
                    .filter(|sibling| sibling.value().name() == "td")
                    .map(|cell| Some(data_cell_text(cell))),
            );
            rows.push(row);
        }
    }

    Ok(Table {
        rows: align_rows(rows, headers.len()),
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="wikitable">
          <tr>
            <th scope="col">Film</th>
            <th scope="col">U.S. release date</th>
            <th scope="col">Director</th>
          </tr>
          <tr>
            <th scope="row">Film A</th>
            <td>May 2, 2008&#160;(2008-05-02)</td>
            <td>Jon X</td>
          </tr>
          <tr>
            <th scope="row">Film B</th>
            <td>June 13, 2008</td>
          </tr>
        </table>
        <table class="wikitable">
          <tr><th scope="col">Ignored</th></tr>
          <tr>
            <th scope="row">Film C</th>
            <td>May 7, 2010</td>
            <td>Jon X</td>
            <td>extra cell</td>
          </tr>
        </table>
        <table class="plain"><tr><td>unrelated</td></tr></table>
        </body></html>
    "#;

    #[test]
    fn schema_comes_from_first_fragment_only() {
        let table = extract_film_table(PAGE).unwrap();
        assert_eq!(table.headers, vec!["Film", "U.S. release date", "Director"]);
    }

    #[test]
    fn rows_span_fragments_and_stay_rectangular() {
        let table = extract_film_table(PAGE).unwrap();
        assert_eq!(table.rows.len(), 3);
        for row in &table.rows {
            assert_eq!(row.len(), table.headers.len());
        }
        // short row padded with null
        assert_eq!(
            table.rows[1],
            vec![
                Some("Film B".to_string()),
                Some("June 13, 2008".to_string()),
                None
            ]
        );
        // long row truncated on the right
        assert_eq!(
            table.rows[2],
            vec![
                Some("Film C".to_string()),
                Some("May 7, 2010".to_string()),
                Some("Jon X".to_string())
            ]
        );
    }

    #[test]
    fn cell_text_is_normalized() {
        let table = extract_film_table(PAGE).unwrap();
        // NBSP becomes a space, the parenthesized sort key is dropped
        assert_eq!(table.rows[0][1], Some("May 2, 2008 ".to_string()));
    }

    #[test]
    fn no_matching_fragments_is_fatal() {
        let err = extract_film_table("<html><body><p>nothing</p></body></html>").unwrap_err();
        assert_eq!(err, ExtractionError::NoTables);
    }

    #[test]
    fn empty_header_row_is_fatal() {
        let html = r#"<table class="wikitable"><tr><td>no headers</td></tr></table>"#;
        assert_eq!(
            extract_film_table(html).unwrap_err(),
            ExtractionError::EmptyHeader
        );
    }

    #[test]
    fn align_pads_and_truncates() {
        let rows = vec![
            vec![Some("a".to_string())],
            vec![
                Some("b".to_string()),
                Some("c".to_string()),
                Some("d".to_string()),
            ],
        ];
        let aligned = align_rows(rows, 2);
        assert_eq!(aligned[0], vec![Some("a".to_string()), None]);
        assert_eq!(aligned[1], vec![Some("b".to_string()), Some("c".to_string())]);
    }
}
