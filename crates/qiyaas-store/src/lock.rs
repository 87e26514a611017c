use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use crate::StoreError;

/// An exclusive lock held next to a ledger file while it is read, updated and
/// written back.
///
/// The lock lives in `<ledger>.lock` and is released when the value is
/// dropped. Processes that take the lock for the same ledger run one after
/// another.
#[derive(Debug)]
pub struct LedgerLock {
    path: PathBuf,
    _file: File,
}

impl LedgerLock {
    /// Blocks until the lock for `ledger` is acquired.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the lock file cannot be created or locked.
    pub fn acquire(ledger: &Path) -> Result<Self, StoreError> {
        let path = lock_path(ledger);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;
        log::debug!("waiting for {}", path.display());
        file.lock().map_err(|e| StoreError::io(&path, e))?;
        Ok(Self { path, _file: file })
    }

    /// Returns the lock file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn lock_path(ledger: &Path) -> PathBuf {
    let mut name = OsString::from(ledger.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use std::fs::TryLockError;

    use super::*;

    #[test]
    fn test_lock_is_exclusive_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = dir.path().join("state/used_words.json");
        let lock = LedgerLock::acquire(&ledger).unwrap();
        assert_eq!(lock.path(), dir.path().join("state/used_words.json.lock"));

        let other = File::open(lock.path()).unwrap();
        assert!(matches!(other.try_lock(), Err(TryLockError::WouldBlock)));

        drop(lock);
        other.try_lock().unwrap();
    }
}
