use anyhow::Result;
use filmscraper::{config::Config, pipeline, store::CsvStore};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configuration and collaborators ──────────────────────────
    let config = Config::from_env()?;
    let client = Client::new();
    let store = CsvStore::connect(config.bucket.clone(), &config.object_prefix).await?;

    // ─── 3) one full run ─────────────────────────────────────────────
    let report = pipeline::run(&config, &client, &store).await?;
    info!(
        status = report.status_code,
        films = report.films,
        enriched = report.enriched,
        elapsed_s = report.processing_time_seconds,
        objects = ?report.objects_created,
        "{}",
        report.body
    );
    Ok(())
}
