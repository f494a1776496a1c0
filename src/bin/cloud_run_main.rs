use anyhow::Result;
use filmscraper::{config::Config, pipeline, store::CsvStore};
use reqwest::Client;
use serde::Serialize;
use std::env;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};
use warp::{reject::Rejection, reply::Reply, Filter};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: Option<String>,
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "film-etl-pipeline"
    })))
}

/// Trigger one run. The request carries no payload; everything the run
/// needs comes from the service configuration.
async fn trigger_run((config, client, store): (Config, Client, CsvStore)) -> Result<impl Reply, Rejection> {
    info!("run triggered");
    match pipeline::run(&config, &client, &store).await {
        Ok(report) => {
            info!(
                films = report.films,
                enriched = report.enriched,
                elapsed_s = report.processing_time_seconds,
                "run complete"
            );
            Ok(warp::reply::json(&report))
        }
        Err(e) => {
            warn!("run failed: {:?}", e);
            Ok(warp::reply::json(&ErrorResponse {
                error: "Run failed".to_string(),
                details: Some(format!("{:?}", e)),
            }))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    info!("Starting film ETL pipeline service");

    let config = Config::from_env()?;
    let client = Client::new();
    let store = CsvStore::connect(config.bucket.clone(), &config.object_prefix).await?;

    let deps = warp::any().map(move || (config.clone(), client.clone(), store.clone()));

    // Health check endpoint
    let health = warp::path("health").and(warp::get()).and_then(health_check);

    // Main run endpoint; any request body is ignored
    let run = warp::path("run")
        .and(warp::post())
        .and(deps)
        .and_then(trigger_run);

    // Combine routes
    let routes = health.or(run);

    // Get port from environment or default to 8080 (Cloud Run default)
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    info!("Server starting on port {}", port);
    info!("Health check: http://localhost:{}/health", port);
    info!("Run endpoint: POST http://localhost:{}/run", port);

    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}
