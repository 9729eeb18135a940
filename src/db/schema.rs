//! SQL DDL for the food document store.
//!
//! Documents live in `food_documents`, one JSON document per record under a
//! `food:<id>` key. The `idx_food` FTS5 table is the search index over the
//! text fields of those documents. It uses the trigram tokenizer, so a phrase
//! of three or more characters matches any substring. It is dropped and
//! rebuilt from the documents whenever a store is constructed.

use rusqlite::Connection;

/// Name of the full-text index table.
pub const INDEX_NAME: &str = "idx_food";

/// Key prefix for food documents.
pub const KEY_PREFIX: &str = "food:";

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS food_documents (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    key TEXT NOT NULL UNIQUE,
    doc TEXT NOT NULL
);
"#;

/// Drops the full-text index if present.
pub const DROP_INDEX_SQL: &str = "DROP TABLE IF EXISTS idx_food";

/// Creates the full-text index. Every field, including the timestamp, is
/// indexed as text.
pub const CREATE_INDEX_SQL: &str = r#"
CREATE VIRTUAL TABLE idx_food USING fts5(
    id,
    user_id,
    name,
    description,
    created,
    tokenize = 'trigram'
);
"#;

/// Shortest text the trigram index can match.
pub const MIN_MATCH_CHARS: usize = 3;

/// Populates the index from the stored documents.
pub const REINDEX_SQL: &str = r#"
INSERT INTO idx_food (rowid, id, user_id, name, description, created)
SELECT seq,
       json_extract(doc, '$.id'),
       json_extract(doc, '$.user_id'),
       json_extract(doc, '$.name'),
       json_extract(doc, '$.description'),
       json_extract(doc, '$.created')
FROM food_documents;
"#;

/// Indexes the single document stored under `seq` (?1). Reads the fields from
/// the stored JSON exactly as [`REINDEX_SQL`] does.
pub const INDEX_DOCUMENT_SQL: &str = r#"
INSERT INTO idx_food (rowid, id, user_id, name, description, created)
SELECT seq,
       json_extract(doc, '$.id'),
       json_extract(doc, '$.user_id'),
       json_extract(doc, '$.name'),
       json_extract(doc, '$.description'),
       json_extract(doc, '$.created')
FROM food_documents
WHERE seq = ?1;
"#;

/// Build the document key for a record id.
pub fn document_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// Initialize the document table. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Drop and recreate the full-text index, then index every stored document.
pub fn rebuild_index(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(DROP_INDEX_SQL)?;
    conn.execute_batch(CREATE_INDEX_SQL)?;
    conn.execute_batch(REINDEX_SQL)?;
    Ok(())
}
