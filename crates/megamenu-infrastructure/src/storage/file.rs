// ============================================================================
// Mega Menu Infrastructure - JSON File Store
// File: crates/megamenu-infrastructure/src/storage/file.rs
// ============================================================================
//! Durable key-value store kept as one JSON object on disk.
//!
//! Every write rewrites the whole file through a temp file and a rename, so
//! a crash leaves either the old or the new content. An optional byte quota
//! mimics the browser storage limit.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use megamenu_core::error::StorageError;
use megamenu_core::repositories::StorageRepository;

pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
    max_bytes: Option<usize>,
}

impl FileStore {
    /// Opens the store, creating parent directories as needed. A missing
    /// file is an empty store; an unreadable one is reported, a corrupt one
    /// is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Storage file {} is corrupt, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(map_io(e)),
        };
        debug!("Opened storage file {} with {} keys", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
            max_bytes: None,
        })
    }

    /// Caps the summed size of keys and values.
    pub fn with_quota(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string_pretty(entries).map_err(|e| StorageError::Backend(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized).map_err(map_io)?;
        fs::rename(&tmp, &self.path).map_err(map_io)
    }
}

fn used_bytes(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

fn map_io(e: io::Error) -> StorageError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => StorageError::AccessDenied(e.to_string()),
        _ => StorageError::Io(e),
    }
}

impl StorageRepository for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());

        if let Some(max) = self.max_bytes {
            let used = used_bytes(&next);
            if used > max {
                return Err(StorageError::QuotaExceeded(format!(
                    "{} bytes requested, limit is {}",
                    used, max
                )));
            }
        }

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}
