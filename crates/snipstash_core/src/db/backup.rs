//! Point-in-time copies of the database directory.

use super::fs_copy::copy_dir_recursive;
use crate::error::AppError;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Copies the database directory to `<db_path>.backup.<unix-seconds>`.
///
/// Run it while no writer has the database open; redb keeps a single file
/// that is only consistent between commits.
pub struct BackupManager {
    db_path: PathBuf,
}

impl BackupManager {
    /// Create a backup manager for the database path.
    pub fn new(db_path: &str) -> Self {
        Self {
            db_path: PathBuf::from(db_path),
        }
    }

    fn backup_path_for(&self, timestamp: u64) -> PathBuf {
        let mut name = self.db_path.as_os_str().to_os_string();
        name.push(format!(".backup.{}", timestamp));
        PathBuf::from(name)
    }

    /// Copy the database directory.
    ///
    /// # Returns
    /// `Ok(Some(path))` with the backup location, or `Ok(None)` when there is
    /// no database to back up yet.
    ///
    /// # Errors
    /// Returns an error if the clock is unusable or copying fails.
    pub fn create_backup(&self) -> Result<Option<PathBuf>, AppError> {
        self.create_backup_at(SystemTime::now())
    }

    fn create_backup_at(&self, now: SystemTime) -> Result<Option<PathBuf>, AppError> {
        if !self.db_path.exists() {
            return Ok(None);
        }
        let seconds = now
            .duration_since(UNIX_EPOCH)
            .map_err(|err| {
                AppError::StorageMessage(format!("System clock is before the Unix epoch: {}", err))
            })?
            .as_secs();
        let backup_path = self.backup_path_for(seconds);
        copy_dir_recursive(&self.db_path, &backup_path)?;
        tracing::info!("Created database backup at {:?}", backup_path);
        Ok(Some(backup_path))
    }
}

#[cfg(test)]
mod tests {
    use super::BackupManager;
    use crate::db::tables::REDB_FILE_NAME;
    use crate::db::Database;
    use crate::models::snippet::CreateSnippetRequest;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn backup_of_missing_database_is_a_noop() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent");
        let manager = BackupManager::new(path.to_str().expect("path"));
        assert!(manager.create_backup().expect("backup").is_none());
    }

    #[test]
    fn backup_copies_database_file_and_reopens() {
        let dir = TempDir::new().expect("temp dir");
        let db_path = dir.path().join("db");
        let db_path_str = db_path.to_str().expect("path");
        {
            let db = Database::new(db_path_str).expect("open");
            db.snippets
                .create(&CreateSnippetRequest::new("t", "rust", "x"))
                .expect("create");
        }

        let manager = BackupManager::new(db_path_str);
        let at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let backup = manager
            .create_backup_at(at)
            .expect("backup")
            .expect("backup path");
        assert!(backup.to_string_lossy().ends_with(".backup.1700000000"));
        assert!(backup.join(REDB_FILE_NAME).exists());

        let restored = Database::new(backup.to_str().expect("path")).expect("reopen");
        let rows = restored
            .snippets
            .list(&crate::SnippetFilter::all())
            .expect("list");
        assert_eq!(rows.len(), 1);
    }
}
