//! File-backed storage port
//!
//! Each key is one `<key>.json` file inside a data directory, with the key
//! percent-encoded into the file name. Every write goes to its own uniquely
//! named temp file in the same directory and is renamed into place, so
//! concurrent writers race only on which rename lands last.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::StoragePort;
use crate::config::StoreConfig;
use crate::error::StorageError;

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory
    pub fn open(dir: impl Into<PathBuf>, quota_bytes: Option<usize>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StorageError::Unavailable(format!("could not create {}: {}", dir.display(), e))
        })?;

        tracing::debug!("File storage opened at {}", dir.display());
        Ok(Self { dir, quota_bytes })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StorageError> {
        Self::open(&config.data_dir, config.quota_bytes)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", urlencoding::encode(key), EXTENSION))
    }

    /// Bytes used by every stored value except the one at `skip`
    fn used_bytes_excluding(&self, skip: &Path) -> Result<usize, StorageError> {
        let mut total = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path == skip || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            total += fs::metadata(&path)?.len() as usize;
        }
        Ok(total)
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);

        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_excluding(&path)? + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        // Dropping an unpersisted temp file deletes it
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| StorageError::Io(e.error))?;

        Ok(())
    }
}
