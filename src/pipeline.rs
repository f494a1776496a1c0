// src/pipeline.rs

use crate::{
    config::{Config, FetchFailurePolicy},
    fetch::{self, EnrichmentRecord},
    process::{clean, enrich, extract, merge},
    store::CsvStore,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{info, warn};

/// Cleaned film table artifact.
pub const FILMS_OBJECT: &str = "movies.csv";
/// Cleaned enrichment table artifact.
pub const ENRICHMENT_OBJECT: &str = "omdb.csv";
/// Joined artifact.
pub const MERGED_OBJECT: &str = "merged.csv";

/// The column both cleaned tables share; the join key.
pub const IDENTIFIER_COLUMN: &str = "film_name";

/// Result contract for one run: all three artifacts written, or the run
/// failed. There is no partial success.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub status_code: u16,
    pub body: String,
    pub films: usize,
    pub enriched: usize,
    pub objects_created: Vec<String>,
    pub processing_time_seconds: f64,
    pub completed_at: DateTime<Utc>,
}

/// Execute one full run: scrape, clean, enrich, reconcile, persist.
///
/// Stages run strictly in sequence; each table is fully materialized and
/// handed to the next stage by value. Enrichment lookups are issued one at
/// a time in table order so runs stay deterministic and gentle on the
/// lookup API.
pub async fn run(config: &Config, client: &Client, store: &CsvStore) -> Result<RunReport> {
    let start = Instant::now();

    // ─── 1) scrape the reference page into a rectangular film table ──
    let html = fetch::page_html(client, &config.source_url).await?;
    let mut films = extract::extract_film_table(&html)?;
    info!(
        rows = films.rows.len(),
        columns = films.headers.len(),
        "extracted film table"
    );

    // ─── 2) canonicalize it ──────────────────────────────────────────
    clean::clean_film_table(&mut films);

    // ─── 3) one lookup per title, in table order ─────────────────────
    let key = films
        .column_index(IDENTIFIER_COLUMN)
        .with_context(|| format!("film table has no {:?} column", IDENTIFIER_COLUMN))?;
    let mut records = Vec::with_capacity(films.rows.len());
    for row in &films.rows {
        let record = match row[key].as_deref() {
            Some(title) => {
                match fetch::lookup_film(client, &config.lookup_url, &config.api_key, title).await
                {
                    Ok(record) => record,
                    Err(err) if config.on_fetch_error == FetchFailurePolicy::Degrade => {
                        warn!(title = %err.title, error = %err, "lookup failed; continuing with empty record");
                        EnrichmentRecord::new()
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            None => {
                warn!("record with null identifier; skipping lookup");
                EnrichmentRecord::new()
            }
        };
        records.push(record);
    }

    // ─── 4) project the lookups and reconcile ────────────────────────
    let enrichment = enrich::clean_enrichment(&records);
    info!(
        matched = enrichment.rows.len(),
        total = records.len(),
        "cleaned enrichment records"
    );

    let mut merged = merge::left_join(&films, &enrichment, IDENTIFIER_COLUMN)
        .context("joining film and enrichment tables")?;
    merge::fill_missing(&mut merged, merge::NOT_AVAILABLE);

    // ─── 5) persist all three artifacts ──────────────────────────────
    let mut objects = Vec::new();
    let artifacts = [
        (FILMS_OBJECT, &films),
        (ENRICHMENT_OBJECT, &enrichment),
        (MERGED_OBJECT, &merged),
    ];
    for (name, table) in artifacts {
        match store.put_table(name, table).await {
            Ok(object) => objects.push(object),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("run failed; artifacts already written: {:?}", objects)
                })
            }
        }
    }

    Ok(RunReport {
        status_code: 200,
        body: "Data uploaded successfully".to_string(),
        films: films.rows.len(),
        enriched: enrichment.rows.len(),
        objects_created: objects,
        processing_time_seconds: start.elapsed().as_secs_f64(),
        completed_at: Utc::now(),
    })
}
