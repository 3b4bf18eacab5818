use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bstr::ByteSlice;

use crate::error::StoreError;

/// Write-once key-value store keeping one file per key in `base_dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        path.exists()
    }

    pub fn get(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        fs::read(path).map_err(|e| {
            log::debug!("Reading {} failed: {}", path.display(), e);
            StoreError::NotFound
        })
    }

    /// Store the trimmed `raw` value at `path`, refusing to replace an existing key.
    ///
    /// Returns the bytes as written.
    pub fn put<'a>(&self, path: &Path, raw: &'a [u8]) -> Result<&'a [u8], StoreError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(StoreError::EmptyValue);
        }
        if self.contains(path) {
            return Err(StoreError::KeyExists);
        }

        fs::create_dir_all(&self.base_dir).map_err(StoreError::Storage)?;

        // create_new fails if another writer got there between the probe and here
        let file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Err(StoreError::KeyExists),
            Err(e) => return Err(StoreError::Storage(e)),
        };
        write_or_remove(file, path, value)?;

        log::info!("Stored {} bytes at {}", value.len(), path.display());
        Ok(value)
    }
}

// A failed write must not leave the key claimed by a partial file.
fn write_or_remove<W: Write>(mut writer: W, path: &Path, value: &[u8]) -> Result<(), StoreError> {
    if let Err(e) = writer.write_all(value).and_then(|_| writer.flush()) {
        drop(writer);
        if let Err(remove_err) = fs::remove_file(path) {
            log::warn!("Could not remove partial file {}: {}", path.display(), remove_err);
        }
        return Err(StoreError::Storage(e));
    }

    Ok(())
}
