//! In-process [`FoodStore`] backed by a lock-guarded map.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::types::{FoodFilter, FoodRecordEntry};
use super::{FoodStore, StoreError};

/// Food store kept entirely in memory. Writes take the exclusive lock, reads
/// the shared lock. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryFoodStore {
    entries: RwLock<HashMap<String, FoodRecordEntry>>,
    next_storage_id: AtomicI64,
}

impl InMemoryFoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FoodStore for InMemoryFoodStore {
    fn create(&self, mut entry: FoodRecordEntry) -> Result<(), StoreError> {
        if entry.id.is_nil() {
            entry.id = Uuid::now_v7();
        }
        if entry.created_at.is_none() {
            entry.created_at = Some(Utc::now());
        }

        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let key = entry.id.to_string();
        if entries.contains_key(&key) {
            return Err(StoreError::BadId(format!("record already exists for id {key}")));
        }

        entry.storage_id = self.next_storage_id.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(id = %key, user_id = %entry.user_id, "memory store created entry");
        entries.insert(key, entry);
        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> Result<FoodRecordEntry, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        entries
            .get(&id.to_string())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn get_by_filter(&self, filter: &FoodFilter) -> Result<Vec<FoodRecordEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut found: Vec<FoodRecordEntry> = entries
            .values()
            .filter(|entry| {
                let keep = filter.matches(entry);
                if !keep {
                    tracing::trace!(id = %entry.id, "skipping entry not matching filter");
                }
                keep
            })
            .cloned()
            .collect();

        found.sort_by_key(|e| e.storage_id);
        Ok(found)
    }

    fn update(&self, entry: FoodRecordEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(entry.id.to_string(), entry);
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.remove(&id.to_string());
        Ok(())
    }
}
