// src/fetch.rs

use crate::error::FetchError;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// One lookup response, treated as an opaque key-value mapping.
pub type EnrichmentRecord = serde_json::Map<String, Value>;

/// The lookup endpoint reports a miss in-band, as an error-string field.
pub const NOT_FOUND_MARKER: &str = "Movie not found!";

/// Fetch the reference page body.
pub async fn page_html(client: &Client, url: &Url) -> Result<String> {
    debug!(%url, "fetching reference page");
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("non-success status from {}", url))?
        .text()
        .await
        .with_context(|| format!("reading body from {}", url))
}

/// Remove the not-found marker field so it never surfaces as a data value.
/// Other error strings are left in place; they are real payload.
pub fn scrub_not_found(record: &mut EnrichmentRecord) {
    if record.get("Error").and_then(Value::as_str) == Some(NOT_FOUND_MARKER) {
        record.remove("Error");
    }
}

/// Look up one title against the enrichment endpoint. A not-found response
/// comes back as a record with the marker already scrubbed; transport
/// failures and non-success statuses come back as [`FetchError`] carrying
/// the title. No retries here.
pub async fn lookup_film(
    client: &Client,
    endpoint: &Url,
    api_key: &str,
    title: &str,
) -> Result<EnrichmentRecord, FetchError> {
    let wrap = |source: reqwest::Error| FetchError {
        title: title.to_string(),
        source,
    };

    debug!(title, "enrichment lookup");
    let mut record: EnrichmentRecord = client
        .get(endpoint.clone())
        .query(&[("t", title), ("apikey", api_key)])
        .send()
        .await
        .map_err(wrap)?
        .error_for_status()
        .map_err(wrap)?
        .json()
        .await
        .map_err(wrap)?;

    scrub_not_found(&mut record);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: &str) -> EnrichmentRecord {
        serde_json::from_str(raw).expect("test record parses")
    }

    #[test]
    fn scrub_removes_exact_marker_only() {
        let mut missed = record(r#"{"Response":"False","Error":"Movie not found!"}"#);
        scrub_not_found(&mut missed);
        assert!(!missed.contains_key("Error"));
        assert_eq!(missed.get("Response").unwrap(), "False");
    }

    #[test]
    fn scrub_keeps_other_error_strings() {
        let mut throttled = record(r#"{"Response":"False","Error":"Request limit reached!"}"#);
        scrub_not_found(&mut throttled);
        assert_eq!(throttled.get("Error").unwrap(), "Request limit reached!");
    }

    #[test]
    fn scrub_is_a_noop_on_hits() {
        let mut hit = record(r#"{"Title":"Film A","Rated":"PG-13"}"#);
        scrub_not_found(&mut hit);
        assert_eq!(hit.len(), 2);
    }
}
