//! Document-store [`FoodStore`] on SQLite with an FTS5 search index.
//!
//! Each record is one JSON document under a `food:<id>` key. Lookups and
//! filtered reads go through the `idx_food` trigram index, which narrows the
//! candidates by substring. Every candidate is then re-checked against the
//! full [`FoodFilter`] before it is handed back, so short terms the index
//! cannot match and the time window behave exactly as in memory.
//!
//! If the index cannot be built when the store is constructed, the store keeps
//! working unindexed: point lookups use the document key and filtered reads
//! scan every document.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{non_empty, FoodFilter, FoodRecordEntry};
use super::{FoodStore, StoreError};
use crate::db::schema;

/// Stored JSON shape of a food record.
#[derive(Debug, Serialize, Deserialize)]
struct FoodDocument {
    id: String,
    user_id: String,
    name: String,
    description: String,
    kj: f64,
    gram: f64,
    ml: f64,
    created: DateTime<Utc>,
}

impl FoodDocument {
    fn from_entry(entry: &FoodRecordEntry, created: DateTime<Utc>) -> Self {
        Self {
            id: entry.id.to_string(),
            user_id: entry.user_id.to_string(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            kj: entry.energy_kj,
            gram: entry.mass_grams,
            ml: entry.volume_ml,
            created,
        }
    }
}

/// Food store persisted as documents in SQLite and searched through FTS5.
pub struct IndexedFoodStore {
    conn: Mutex<Connection>,
    indexed: bool,
}

impl IndexedFoodStore {
    /// Wrap an open connection. Drops and recreates the search index over the
    /// existing documents; a failure there is logged and the store runs
    /// unindexed.
    pub fn new(conn: Connection) -> Result<Self, StoreError> {
        schema::init_schema(&conn)?;

        let indexed = match schema::rebuild_index(&conn) {
            Ok(()) => {
                tracing::info!(index = schema::INDEX_NAME, "food search index rebuilt");
                true
            }
            Err(e) => {
                tracing::error!(
                    index = schema::INDEX_NAME,
                    error = %e,
                    "index creation failed, continuing without search index"
                );
                false
            }
        };

        Ok(Self {
            conn: Mutex::new(conn),
            indexed,
        })
    }

    /// Whether the search index is available for this run.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl FoodStore for IndexedFoodStore {
    fn create(&self, mut entry: FoodRecordEntry) -> Result<(), StoreError> {
        if entry.id.is_nil() {
            entry.id = Uuid::now_v7();
        }
        let created = *entry.created_at.get_or_insert_with(Utc::now);

        let doc = FoodDocument::from_entry(&entry, created);
        let key = schema::document_key(&doc.id);
        let json = serde_json::to_string(&doc)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT COUNT(*) > 0 FROM food_documents WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        if exists {
            return Err(StoreError::BadId(format!("record id already exists: {}", doc.id)));
        }

        tx.execute(
            "INSERT INTO food_documents (key, doc) VALUES (?1, ?2)",
            params![key, json],
        )?;
        let seq = tx.last_insert_rowid();

        if self.indexed {
            tx.execute(schema::INDEX_DOCUMENT_SQL, params![seq])?;
        }

        tx.commit()?;
        tracing::info!(key = %key, seq, "food document created");
        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> Result<FoodRecordEntry, StoreError> {
        let conn = self.lock()?;

        if !self.indexed {
            let key = schema::document_key(&id.to_string());
            let row: Option<(i64, String, String)> = conn
                .query_row(
                    "SELECT seq, key, doc FROM food_documents WHERE key = ?1",
                    params![key],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )
                .optional()?;
            let (seq, key, doc) = row.ok_or(StoreError::NotFound)?;
            return decode_document(seq, &key, &doc);
        }

        let query = match_term("id", &id.to_string()).ok_or(StoreError::NotFound)?;
        let rows = query_index(&conn, &query)?;

        if rows.len() != 1 {
            tracing::warn!(id = %id, hits = rows.len(), "expected exactly one document");
            return Err(StoreError::NotFound);
        }

        let (seq, key, doc) = &rows[0];
        let entry = decode_document(*seq, key, doc)?;
        if entry.id != id {
            return Err(StoreError::NotFound);
        }
        Ok(entry)
    }

    fn get_by_filter(&self, filter: &FoodFilter) -> Result<Vec<FoodRecordEntry>, StoreError> {
        let conn = self.lock()?;

        let rows = if self.indexed {
            let query = build_match_query(filter);
            tracing::debug!(query = %query, "querying food index");
            query_index(&conn, &query)?
        } else {
            scan_documents(&conn)?
        };

        let mut found = Vec::with_capacity(rows.len());
        for (seq, key, doc) in rows {
            let entry = decode_document(seq, &key, &doc)?;
            // Time bounds and substrings are not expressible in the index query
            if filter.matches(&entry) {
                found.push(entry);
            }
        }

        tracing::debug!(matched = found.len(), "food filter applied");
        Ok(found)
    }

    fn update(&self, _entry: FoodRecordEntry) -> Result<(), StoreError> {
        Err(StoreError::NotImplemented("update food record"))
    }

    fn delete(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(StoreError::NotImplemented("delete food record"))
    }
}

/// Build a conjunctive FTS5 query for `filter`. The user id is always present;
/// id, name and description are added when supplied and long enough for the
/// trigram index.
pub fn build_match_query(filter: &FoodFilter) -> String {
    let mut terms = Vec::with_capacity(4);
    terms.extend(match_term("user_id", &filter.user_id.to_string()));

    if let Some(id) = filter.id {
        terms.extend(match_term("id", &id.to_string()));
    }
    if let Some(name) = non_empty(&filter.name) {
        terms.extend(match_term("name", name));
    }
    if let Some(description) = non_empty(&filter.description) {
        terms.extend(match_term("description", description));
    }

    terms.join(" AND ")
}

/// A column-scoped substring phrase, or `None` if `text` is too short for the
/// trigram index to match.
fn match_term(column: &str, text: &str) -> Option<String> {
    if text.chars().count() < schema::MIN_MATCH_CHARS {
        return None;
    }
    Some(format!("{column} : \"{}\"", text.replace('"', "\"\"")))
}

type DocumentRow = (i64, String, String);

fn query_index(conn: &Connection, query: &str) -> Result<Vec<DocumentRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT d.seq, d.key, d.doc FROM idx_food \
         JOIN food_documents d ON d.seq = idx_food.rowid \
         WHERE idx_food MATCH ?1 ORDER BY d.seq",
    )?;
    let rows = stmt
        .query_map(params![query], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn scan_documents(conn: &Connection) -> Result<Vec<DocumentRow>, StoreError> {
    let mut stmt = conn.prepare("SELECT seq, key, doc FROM food_documents ORDER BY seq")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn decode_document(seq: i64, key: &str, doc: &str) -> Result<FoodRecordEntry, StoreError> {
    let doc: FoodDocument = serde_json::from_str(doc)?;
    let corrupt = |reason: String| StoreError::Corrupt {
        key: key.to_string(),
        reason,
    };

    let id = Uuid::parse_str(&doc.id).map_err(|e| corrupt(format!("id: {e}")))?;
    let user_id = Uuid::parse_str(&doc.user_id).map_err(|e| corrupt(format!("user_id: {e}")))?;

    Ok(FoodRecordEntry {
        storage_id: seq,
        id,
        user_id,
        name: doc.name,
        description: doc.description,
        energy_kj: doc.kj,
        mass_grams: doc.gram,
        volume_ml: doc.ml,
        created_at: Some(doc.created),
    })
}
