//! Food diary records: data model, unit conversion, mapping and persistence.
//!
//! Persistence is expressed through the [`FoodStore`] capability trait with two
//! implementations: [`memory::InMemoryFoodStore`] and
//! [`indexed::IndexedFoodStore`] (SQLite documents plus an FTS5 index). The
//! backend is selected from configuration via [`create_store`].

pub mod indexed;
pub mod mapping;
pub mod memory;
pub mod types;
pub mod units;

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use types::{FoodFilter, FoodRecordEntry};

/// Errors raised by a [`FoodStore`].
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("bad id: {0}")]
    BadId(String),

    #[error("not implemented yet: {0}")]
    NotImplemented(&'static str),

    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("corrupt document {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence capability for food records.
///
/// All methods are synchronous. Callers in async contexts should use
/// `tokio::task::spawn_blocking`.
pub trait FoodStore: Send + Sync {
    /// Persist a new entry. A nil id is replaced with a generated one and a
    /// missing creation time is set to now. Fails with [`StoreError::BadId`]
    /// if an entry with the same id already exists.
    fn create(&self, entry: FoodRecordEntry) -> Result<(), StoreError>;

    /// Fetch a single entry by its public id.
    fn get_by_id(&self, id: Uuid) -> Result<FoodRecordEntry, StoreError>;

    /// Fetch every entry matching `filter`. No matches is an empty vec.
    fn get_by_filter(&self, filter: &FoodFilter) -> Result<Vec<FoodRecordEntry>, StoreError>;

    /// Replace an existing entry in place.
    fn update(&self, entry: FoodRecordEntry) -> Result<(), StoreError>;

    /// Remove an entry.
    fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Create a food store from config.
///
/// Supported backends: `"memory"` and `"indexed"`.
pub fn create_store(config: &crate::config::StorageConfig) -> Result<Arc<dyn FoodStore>> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(memory::InMemoryFoodStore::new())),
        "indexed" => {
            let path = crate::config::expand_tilde(&config.db_path);
            let conn = crate::db::open_database(&path)?;
            Ok(Arc::new(indexed::IndexedFoodStore::new(conn)?))
        }
        other => anyhow::bail!("unknown storage backend: {other}. Supported: memory, indexed"),
    }
}
