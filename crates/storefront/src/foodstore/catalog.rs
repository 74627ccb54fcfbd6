//! Catalog reads and vendor menu writes.
//!
//! Hawker centres live at `hawkers/{id}`, stalls at `stalls/{id}` with a
//! secondary index `hawkers/{hawker_id}/stalls/{stall_id} -> true`, and
//! menus directly under `menus/{stall_id}/{item_code}`.

use std::collections::BTreeMap;

use tracing::{instrument, warn};

use makan_core::{HawkerId, ItemCode, StallId};

use super::cache::{CacheKey, CacheValue};
use super::types::{Dish, DishRecord, HawkerCentre, HawkerRecord, Stall, StallRecord};
use super::{StoreClient, StoreError};

impl StoreClient {
    /// List all hawker centres, sorted by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or the records are
    /// malformed.
    #[instrument(skip(self))]
    pub async fn hawkers(&self) -> Result<Vec<HawkerCentre>, StoreError> {
        if let Some(CacheValue::Hawkers(cached)) = self.inner.cache.get(&CacheKey::Hawkers).await {
            return Ok(cached);
        }

        let map: BTreeMap<String, HawkerRecord> =
            self.get_json("hawkers").await?.unwrap_or_default();

        let hawkers: Vec<HawkerCentre> = map
            .into_iter()
            .filter_map(|(key, record)| match key.parse::<HawkerId>() {
                Ok(id) => Some(HawkerCentre::from_record(id, record)),
                Err(_) => {
                    warn!(key = %key, "skipping hawker with non-numeric key");
                    None
                }
            })
            .collect();

        self.inner
            .cache
            .insert(CacheKey::Hawkers, CacheValue::Hawkers(hawkers.clone()))
            .await;
        Ok(hawkers)
    }

    /// Fetch one hawker centre.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or the record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn hawker(&self, id: HawkerId) -> Result<Option<HawkerCentre>, StoreError> {
        let key = CacheKey::Hawker(id.as_i32());
        if let Some(CacheValue::Hawker(cached)) = self.inner.cache.get(&key).await {
            return Ok(Some(*cached));
        }

        let record: Option<HawkerRecord> = self.get_json(&format!("hawkers/{id}")).await?;
        let Some(record) = record else {
            return Ok(None);
        };

        let hawker = HawkerCentre::from_record(id, record);
        self.inner
            .cache
            .insert(key, CacheValue::Hawker(Box::new(hawker.clone())))
            .await;
        Ok(Some(hawker))
    }

    /// List the stalls of one hawker centre via the hand-maintained index.
    ///
    /// Dangling index entries (stall deleted, index write missed) are
    /// skipped with a warning rather than failing the whole page.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or a record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn stalls_for_hawker(&self, hawker_id: HawkerId) -> Result<Vec<Stall>, StoreError> {
        let key = CacheKey::HawkerStalls(hawker_id.as_i32());
        if let Some(CacheValue::Stalls(cached)) = self.inner.cache.get(&key).await {
            return Ok(cached);
        }

        let index: BTreeMap<String, bool> = self
            .get_json(&format!("hawkers/{hawker_id}/stalls"))
            .await?
            .unwrap_or_default();

        let mut stalls = Vec::with_capacity(index.len());
        for (raw_id, present) in index {
            if !present {
                continue;
            }
            let Ok(stall_id) = raw_id.parse::<StallId>() else {
                warn!(key = %raw_id, "skipping stall index entry with non-numeric key");
                continue;
            };
            match self.stall(stall_id).await? {
                Some(stall) => stalls.push(stall),
                None => warn!(%stall_id, "stall index entry dangles; skipping"),
            }
        }

        self.inner
            .cache
            .insert(key, CacheValue::Stalls(stalls.clone()))
            .await;
        Ok(stalls)
    }

    /// Fetch one stall.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or the record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn stall(&self, id: StallId) -> Result<Option<Stall>, StoreError> {
        let key = CacheKey::Stall(id.as_i32());
        if let Some(CacheValue::Stall(cached)) = self.inner.cache.get(&key).await {
            return Ok(Some(*cached));
        }

        let record: Option<StallRecord> = self.get_json(&format!("stalls/{id}")).await?;
        let Some(record) = record else {
            return Ok(None);
        };

        let stall = Stall::from_record(id, record);
        self.inner
            .cache
            .insert(key, CacheValue::Stall(Box::new(stall.clone())))
            .await;
        Ok(Some(stall))
    }

    /// List one stall's menu, sorted by item code.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or a record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn menu(&self, stall_id: StallId) -> Result<Vec<Dish>, StoreError> {
        let key = CacheKey::Menu(stall_id.as_i32());
        if let Some(CacheValue::Menu(cached)) = self.inner.cache.get(&key).await {
            return Ok(cached);
        }

        let map: BTreeMap<String, DishRecord> = self
            .get_json(&format!("menus/{stall_id}"))
            .await?
            .unwrap_or_default();

        let dishes: Vec<Dish> = map
            .into_iter()
            .filter_map(|(raw_code, record)| match ItemCode::parse(&raw_code) {
                Ok(code) => Some(Dish::from_record(stall_id, code, record)),
                Err(e) => {
                    warn!(code = %raw_code, error = %e, "skipping dish with invalid code");
                    None
                }
            })
            .collect();

        self.inner
            .cache
            .insert(key, CacheValue::Menu(dishes.clone()))
            .await;
        Ok(dishes)
    }

    /// Fetch one dish from a stall's menu.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or the record is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn dish(
        &self,
        stall_id: StallId,
        code: &ItemCode,
    ) -> Result<Option<Dish>, StoreError> {
        let record: Option<DishRecord> =
            self.get_json(&format!("menus/{stall_id}/{code}")).await?;
        Ok(record.map(|r| Dish::from_record(stall_id, code.clone(), r)))
    }

    /// Create or replace a menu item (vendor operation).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    #[instrument(skip(self, record))]
    pub async fn put_dish(
        &self,
        stall_id: StallId,
        code: &ItemCode,
        record: &DishRecord,
    ) -> Result<(), StoreError> {
        self.put_json(&format!("menus/{stall_id}/{code}"), record)
            .await?;
        self.inner
            .cache
            .invalidate(&CacheKey::Menu(stall_id.as_i32()))
            .await;
        Ok(())
    }

    /// Delete a menu item (vendor operation).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the delete fails.
    #[instrument(skip(self))]
    pub async fn delete_dish(&self, stall_id: StallId, code: &ItemCode) -> Result<(), StoreError> {
        self.delete_json(&format!("menus/{stall_id}/{code}")).await?;
        self.inner
            .cache
            .invalidate(&CacheKey::Menu(stall_id.as_i32()))
            .await;
        Ok(())
    }

    /// Create or replace a hawker centre (seeding).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub async fn put_hawker(&self, id: HawkerId, record: &HawkerRecord) -> Result<(), StoreError> {
        self.put_json(&format!("hawkers/{id}"), record).await?;
        self.inner.cache.invalidate(&CacheKey::Hawkers).await;
        self.inner
            .cache
            .invalidate(&CacheKey::Hawker(id.as_i32()))
            .await;
        Ok(())
    }

    /// Create or replace a stall and its hawker index entry (seeding).
    ///
    /// Two writes; a failure between them leaves the index stale.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if either write fails.
    pub async fn put_stall(&self, id: StallId, record: &StallRecord) -> Result<(), StoreError> {
        let hawker_id = record.hawker_id;
        self.put_json(&format!("stalls/{id}"), record).await?;
        self.put_json(&format!("hawkers/{hawker_id}/stalls/{id}"), &true)
            .await?;
        self.inner
            .cache
            .invalidate(&CacheKey::Stall(id.as_i32()))
            .await;
        self.inner
            .cache
            .invalidate(&CacheKey::HawkerStalls(hawker_id.as_i32()))
            .await;
        Ok(())
    }
}
