//! Database layer for SnipStash.

/// Backup utilities.
pub mod backup;
mod fs_copy;
/// Snippet storage operations.
pub mod snippet;
/// redb table definitions.
pub mod tables;

use crate::error::AppError;
use std::path::Path;
use std::sync::Arc;

/// Database handle with typed accessors over the shared redb instance.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub snippets: snippet::SnippetDb,
}

impl Database {
    /// Open (or create) the database inside the `path` directory.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the database file
    /// is held by another process, or table initialization fails.
    pub fn new(path: &str) -> Result<Self, AppError> {
        std::fs::create_dir_all(path).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                path, err
            ))
        })?;

        let file = Path::new(path).join(tables::REDB_FILE_NAME);
        let db = match redb::Database::create(&file) {
            Ok(db) => db,
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database at '{}' is already open in another process.\n\
                    Stop the other SnipStash server, or set DB_PATH to a different location.",
                    path
                )));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::debug!("Opened database at {:?}", file);
        Self::from_shared(Arc::new(db))
    }

    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Errors
    /// Returns an error if the required tables cannot be created.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            snippets: snippet::SnippetDb::new(db.clone())?,
            db,
        })
    }
}
