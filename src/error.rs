// src/error.rs

use thiserror::Error;

/// The source page yielded nothing to work with. Fatal: with no table
/// fragments or no header columns there is nothing to clean downstream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no matching table fragments in document")]
    NoTables,
    #[error("header row yielded no columns")]
    EmptyHeader,
}

/// A single enrichment lookup failed at the transport level (network error
/// or non-success status). Carries the title so the caller can decide
/// whether to abort the run or substitute an empty record and continue.
#[derive(Debug, Error)]
#[error("enrichment lookup for {title:?} failed")]
pub struct FetchError {
    pub title: String,
    #[source]
    pub source: reqwest::Error,
}

/// Writing one artifact to object storage failed. Fatal for the run; the
/// orchestrator reports which artifacts had already been written.
#[derive(Debug, Error)]
#[error("upload of {object:?} failed")]
pub struct PersistenceError {
    pub object: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}
