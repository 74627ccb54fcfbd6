//! Hosted hierarchical data store client.
//!
//! All catalog, order, like and feedback data lives in a hosted realtime
//! database addressed by path: `GET/PUT/PATCH/DELETE {base}/{path}.json`,
//! authenticated with an API key. Records are JSON objects; a missing path
//! reads as JSON `null`.
//!
//! The store has no native queries, so foreign-key lookups are emulated with
//! hand-maintained secondary indexes of the shape
//! `entity_a/{id_a}/entity_b/{id_b} -> true`. Index entries are written
//! alongside the primary record; a failure between the two writes leaves the
//! index stale, which readers tolerate by skipping dangling entries.
//!
//! Read-mostly catalog lookups (hawkers, stalls, menus) are cached with
//! `moka` (5-minute TTL). Writes that touch cached data invalidate the
//! affected entries.

mod cache;
mod catalog;
mod feedback;
mod likes;
mod orders;
mod profiles;
pub mod types;

pub use feedback::{ComplaintRecord, FeedbackRecord};
pub use types::{
    AccountRole, Dish, DishRecord, HawkerCentre, HawkerRecord, Profile, Stall, StallRecord,
};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::FoodStoreConfig;

use cache::{CacheKey, CacheValue};

/// Errors from the hosted data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport failure (connection, timeout, body read).
    #[error("data store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("data store returned {status} for {path}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    /// The record at a path did not match the canonical schema.
    #[error("malformed record at {path}: {message}")]
    Malformed { path: String, message: String },
}

// =============================================================================
// StoreClient
// =============================================================================

/// Client for the hosted hierarchical data store.
///
/// Cheaply cloneable; catalog reads are cached for 5 minutes.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl StoreClient {
    /// Create a new data store client.
    #[must_use]
    pub fn new(config: &FoodStoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(StoreClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}.json?auth={}",
            self.inner.base_url, path, self.inner.api_key
        )
    }

    /// Read the record at `path`, or `None` if the path is empty.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, StoreError> {
        let response = self.inner.client.get(self.url(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                path: path.to_owned(),
                status,
            });
        }

        let value: serde_json::Value = response.json().await?;
        if value.is_null() {
            return Ok(None);
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Malformed {
                path: path.to_owned(),
                message: e.to_string(),
            })
    }

    /// Replace the record at `path`.
    async fn put_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                path: path.to_owned(),
                status,
            });
        }
        Ok(())
    }

    /// Merge fields into the record at `path`.
    async fn patch_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                path: path.to_owned(),
                status,
            });
        }
        Ok(())
    }

    /// Delete the record at `path`. Deleting a missing path succeeds.
    async fn delete_json(&self, path: &str) -> Result<(), StoreError> {
        let response = self.inner.client.delete(self.url(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                path: path.to_owned(),
                status,
            });
        }
        Ok(())
    }

    /// Probe connectivity by reading the catalog root.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or rejects the key.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.get_json::<serde_json::Value>("hawkers").await.map(|_| ())
    }
}
