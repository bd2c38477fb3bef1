//! Filesystem copy used by database backups.

use crate::error::AppError;
use std::fs;
use std::path::Path;

fn copy_error(action: &str, path: &Path, err: std::io::Error) -> AppError {
    AppError::StorageMessage(format!("Failed to {} {:?}: {}", action, path, err))
}

/// Recursively copy `src` into `dst`, creating `dst` as needed.
pub(crate) fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dst).map_err(|err| copy_error("create", dst, err))?;

    for entry in fs::read_dir(src).map_err(|err| copy_error("read", src, err))? {
        let entry = entry.map_err(|err| copy_error("read entry in", src, err))?;
        let path = entry.path();
        let target = dst.join(entry.file_name());

        if path.is_dir() {
            copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target).map_err(|err| copy_error("copy", &path, err))?;
        }
    }

    Ok(())
}
