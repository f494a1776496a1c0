// src/store.rs

use crate::error::PersistenceError;
use crate::process::Table;
use anyhow::{Context, Result};
use google_cloud_storage::{
    client::{Client, ClientConfig},
    http::objects::upload::{Media, UploadObjectRequest, UploadType},
};
use tracing::info;

/// CSV artifact sink: one bucket, one key prefix, one object per table.
#[derive(Clone)]
pub struct CsvStore {
    client: Client,
    bucket: String,
    prefix: String,
}

fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{}/", prefix)
    }
}

impl CsvStore {
    /// Connect with application-default credentials.
    pub async fn connect(bucket: String, prefix: &str) -> Result<Self> {
        let config = ClientConfig::default()
            .with_auth()
            .await
            .context("authenticating storage client")?;
        Ok(Self {
            client: Client::new(config),
            bucket,
            prefix: normalize_prefix(prefix),
        })
    }

    /// Object key for an artifact name.
    pub fn object_key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Serialize `table` as CSV and upload it under `<prefix><name>`.
    /// Returns the object key on success.
    pub async fn put_table(&self, name: &str, table: &Table) -> Result<String, PersistenceError> {
        let object = self.object_key(name);
        let body = table.to_csv().map_err(|e| PersistenceError {
            object: object.clone(),
            source: e.into(),
        })?;

        let upload_type = UploadType::Simple(Media::new(object.clone()));
        let request = UploadObjectRequest {
            bucket: self.bucket.clone(),
            ..Default::default()
        };
        self.client
            .upload_object(&request, body, &upload_type)
            .await
            .map_err(|e| PersistenceError {
                object: object.clone(),
                source: Box::new(e),
            })?;

        info!("uploaded gs://{}/{}", self.bucket, object);
        Ok(object)
    }
}
