//! Single-writer lock for a source directory.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{AssetError, AssetResult};

/// Lock file kept inside the source directory.
pub const LOCK_FILE: &str = ".texpipe.lock";

/// Held while a source directory's metadata is being rewritten.
///
/// An exclusive advisory lock on `.texpipe.lock`. The OS drops it when the
/// holder exits for any reason, so a crashed run never blocks the next one.
/// The file itself stays; its contents are only the last owner's pid.
#[derive(Debug)]
pub struct DirLock {
    path: PathBuf,
    file: File,
}

impl DirLock {
    /// Try to lock `dir`. Returns `Ok(None)` if a live run holds the lock.
    pub fn acquire(dir: &Path) -> AssetResult<Option<Self>> {
        let path = Self::path_for(dir);
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| AssetError::io(&path, e))?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => return Ok(None),
            Err(TryLockError::Error(e)) => return Err(AssetError::io(&path, e)),
        }

        // Owner pid, for humans
        let _ = file.set_len(0).and_then(|()| writeln!(file, "{}", std::process::id()));
        Ok(Some(Self { path, file }))
    }

    pub fn path_for(dir: &Path) -> PathBuf {
        dir.join(LOCK_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
