//! Feedback and complaint records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use uuid::Uuid;

use makan_core::{CustomerId, Email, StallId};

use super::{StoreClient, StoreError};

/// General feedback about the app or a visit, stored at `feedback/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    /// Submitting customer, when logged in.
    pub user_id: Option<CustomerId>,
    pub email: Email,
    pub message: String,
    /// 1-5 stars, when given.
    pub rating: Option<u8>,
    pub submitted_at: DateTime<Utc>,
}

/// A complaint against one stall, stored at `complaints/{id}` with an index
/// entry `stalls/{stall_id}/complaints/{id} -> true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub id: Uuid,
    pub user_id: Option<CustomerId>,
    pub stall_id: StallId,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

impl StoreClient {
    /// Store a feedback record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn create_feedback(&self, record: &FeedbackRecord) -> Result<(), StoreError> {
        self.put_json(&format!("feedback/{}", record.id), record)
            .await
    }

    /// Store a complaint and its stall index entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if either write fails.
    #[instrument(skip(self, record), fields(id = %record.id, stall_id = %record.stall_id))]
    pub async fn create_complaint(&self, record: &ComplaintRecord) -> Result<(), StoreError> {
        self.put_json(&format!("complaints/{}", record.id), record)
            .await?;
        self.put_json(
            &format!("stalls/{}/complaints/{}", record.stall_id, record.id),
            &true,
        )
        .await
    }

    /// List complaints against one stall, newest first (vendor dashboard).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or a record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn complaints_for_stall(
        &self,
        stall_id: StallId,
    ) -> Result<Vec<ComplaintRecord>, StoreError> {
        let index: BTreeMap<String, bool> = self
            .get_json(&format!("stalls/{stall_id}/complaints"))
            .await?
            .unwrap_or_default();

        let mut complaints = Vec::with_capacity(index.len());
        for (raw_id, present) in index {
            if !present {
                continue;
            }
            let Ok(id) = Uuid::parse_str(&raw_id) else {
                warn!(key = %raw_id, "skipping complaint index entry with invalid id");
                continue;
            };
            let record: Option<ComplaintRecord> =
                self.get_json(&format!("complaints/{id}")).await?;
            match record {
                Some(record) => complaints.push(record),
                None => warn!(%id, "complaint index entry dangles; skipping"),
            }
        }

        complaints.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(complaints)
    }
}
