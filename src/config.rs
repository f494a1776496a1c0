// src/config.rs

use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Reference page listing the films, first table carries the schema.
pub const DEFAULT_SOURCE_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_Marvel_Cinematic_Universe_films";

/// Per-title lookup endpoint; queried as `?t=<title>&apikey=<key>`.
pub const DEFAULT_LOOKUP_URL: &str = "http://www.omdbapi.com/";

/// All three artifacts land under this key prefix in the bucket.
pub const DEFAULT_OBJECT_PREFIX: &str = "scrape_marvel_movie_data/";

/// What to do when a single enrichment lookup fails at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailurePolicy {
    /// Fail the whole run on the first lookup error.
    Abort,
    /// Log the title, substitute an empty record, and keep going.
    Degrade,
}

impl FetchFailurePolicy {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "abort" => Ok(Self::Abort),
            "degrade" => Ok(Self::Degrade),
            other => anyhow::bail!("unknown fetch failure policy {:?}", other),
        }
    }
}

/// Run configuration. Built once at the entry point and passed by value into
/// the pipeline; the library itself never reads the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub bucket: String,
    pub object_prefix: String,
    pub source_url: Url,
    pub lookup_url: Url,
    pub on_fetch_error: FetchFailurePolicy,
}

impl Config {
    /// Construct a config with the built-in endpoints and prefix.
    pub fn new(api_key: String, bucket: String) -> Result<Self> {
        Ok(Self {
            api_key,
            bucket,
            object_prefix: DEFAULT_OBJECT_PREFIX.to_string(),
            source_url: Url::parse(DEFAULT_SOURCE_URL).context("parsing source URL")?,
            lookup_url: Url::parse(DEFAULT_LOOKUP_URL).context("parsing lookup URL")?,
            on_fetch_error: FetchFailurePolicy::Degrade,
        })
    }

    /// Read `API_KEY` and `BUCKET_NAME` (required) and `ON_FETCH_ERROR`
    /// (optional, `abort` or `degrade`) from the environment. Missing
    /// required variables fail here, at startup, not deep in the run.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("API_KEY").context("API_KEY is not set")?;
        let bucket = env::var("BUCKET_NAME").context("BUCKET_NAME is not set")?;
        let mut config = Self::new(api_key, bucket)?;
        if let Ok(policy) = env::var("ON_FETCH_ERROR") {
            config.on_fetch_error = FetchFailurePolicy::parse(&policy)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() -> Result<()> {
        let config = Config::new("key".into(), "bucket".into())?;
        assert_eq!(config.object_prefix, DEFAULT_OBJECT_PREFIX);
        assert_eq!(config.on_fetch_error, FetchFailurePolicy::Degrade);
        assert_eq!(config.lookup_url.as_str(), "http://www.omdbapi.com/");
        Ok(())
    }

    #[test]
    fn policy_parses() {
        assert_eq!(
            FetchFailurePolicy::parse("abort").unwrap(),
            FetchFailurePolicy::Abort
        );
        assert_eq!(
            FetchFailurePolicy::parse("degrade").unwrap(),
            FetchFailurePolicy::Degrade
        );
        assert!(FetchFailurePolicy::parse("retry").is_err());
    }
}
