//! Snippet storage operations backed by redb.

mod helpers;

use crate::{
    db::tables::*,
    error::AppError,
    models::snippet::*,
    query::SnippetFilter,
};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata};
use std::sync::Arc;

use self::helpers::{decode_snippet, encode_snippet, reverse_timestamp_key};

/// Accessor for snippet-related redb tables.
pub struct SnippetDb {
    db: Arc<redb::Database>,
}

impl SnippetDb {
    /// Initialize snippet tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(SNIPPETS)?;
        write_txn.open_table(SNIPPETS_BY_CREATED)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Validate a create payload and persist a new snippet.
    ///
    /// # Returns
    /// The stored snippet with its assigned id and creation timestamp.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] for invalid fields, or a storage error.
    pub fn create(&self, request: &CreateSnippetRequest) -> Result<Snippet, AppError> {
        let snippet = Snippet::new(request.validate()?);
        self.insert(&snippet)?;
        tracing::debug!(id = %snippet.id, "created snippet");
        Ok(snippet)
    }

    /// Insert a fully-formed row and its recency index entry atomically.
    ///
    /// # Errors
    /// Returns an error when the id already exists or storage operations fail.
    pub(crate) fn insert(&self, snippet: &Snippet) -> Result<(), AppError> {
        let encoded = encode_snippet(snippet)?;
        let recency_key = reverse_timestamp_key(snippet.created_at);

        let write_txn = self.db.begin_write()?;
        {
            let mut rows = write_txn.open_table(SNIPPETS)?;
            let mut by_created = write_txn.open_table(SNIPPETS_BY_CREATED)?;

            if rows.get(snippet.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "Snippet id '{}' already exists",
                    snippet.id
                )));
            }

            rows.insert(snippet.id.as_str(), encoded.as_slice())?;
            by_created.insert((recency_key, snippet.id.as_str()), ())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Fetch a snippet by id.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when the id is unknown, or a storage error.
    pub fn get(&self, id: &str) -> Result<Snippet, AppError> {
        let read_txn = self.db.begin_read()?;
        let rows = read_txn.open_table(SNIPPETS)?;
        let Some(row) = rows.get(id)? else {
            return Err(AppError::NotFound);
        };
        Ok(decode_snippet(row.value())?)
    }

    /// Apply a partial update and return the full updated record.
    ///
    /// Supplied fields are re-validated against the merged record; nothing is
    /// written when validation fails. The id and creation timestamp, and so
    /// the recency index entry, never change.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] for unknown ids, [`AppError::Validation`]
    /// when the merged record is invalid, or a storage error.
    pub fn update(&self, id: &str, update: &UpdateSnippetRequest) -> Result<Snippet, AppError> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut rows = write_txn.open_table(SNIPPETS)?;
            let Some(row) = rows.get(id)? else {
                return Err(AppError::NotFound);
            };
            let current = decode_snippet(row.value())?;
            drop(row);

            let updated = current.merged_with(update)?;
            let encoded = encode_snippet(&updated)?;
            rows.insert(id, encoded.as_slice())?;
            updated
        };
        write_txn.commit()?;
        tracing::debug!(id = %id, "updated snippet");
        Ok(updated)
    }

    /// Delete a snippet permanently.
    ///
    /// # Returns
    /// The removed record.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when the id is unknown, or a storage error.
    pub fn delete(&self, id: &str) -> Result<Snippet, AppError> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut rows = write_txn.open_table(SNIPPETS)?;
            let mut by_created = write_txn.open_table(SNIPPETS_BY_CREATED)?;

            let Some(row) = rows.get(id)? else {
                return Err(AppError::NotFound);
            };
            let snippet = decode_snippet(row.value())?;
            drop(row);

            let _ = by_created.remove((reverse_timestamp_key(snippet.created_at), id))?;
            let _ = rows.remove(id)?;
            snippet
        };
        write_txn.commit()?;
        tracing::debug!(id = %id, "deleted snippet");
        Ok(deleted)
    }

    /// List snippets matching `filter`, newest first.
    ///
    /// # Returns
    /// Every matching row in descending creation order; empty when none match.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self, filter: &SnippetFilter) -> Result<Vec<Snippet>, AppError> {
        let read_txn = self.db.begin_read()?;
        let by_created = read_txn.open_table(SNIPPETS_BY_CREATED)?;
        let rows = read_txn.open_table(SNIPPETS)?;
        let mut snippets = Vec::new();

        for item in by_created.iter()? {
            let (key, _) = item?;
            let (_, snippet_id) = key.value();
            let Some(row) = rows.get(snippet_id)? else {
                tracing::warn!(id = %snippet_id, "recency index entry without snippet row");
                continue;
            };
            let snippet = decode_snippet(row.value())?;
            if filter.matches(&snippet) {
                snippets.push(snippet);
            }
        }

        Ok(snippets)
    }

    /// Count stored snippets.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let rows = read_txn.open_table(SNIPPETS)?;
        Ok(rows.len()?)
    }
}
