// ============================================================================
// Mega Menu Core - Menu Persistence
// File: crates/megamenu-core/src/services/persistence.rs
// ============================================================================
//! Save/load/clear of the serialized tree under one fixed key.
//!
//! Storage failures stop here: they are logged and the caller sees either
//! success or "nothing happened".

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use megamenu_shared::constants::MENU_STORAGE_KEY;

use crate::domain::{MenuItem, MenuTree};
use crate::repositories::StorageRepository;
use crate::validation::{parse_tree_str, sanitize_tree};

pub struct MenuPersistence<S: StorageRepository> {
    storage: Arc<S>,
    key: String,
}

impl<S: StorageRepository> MenuPersistence<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_key(storage, MENU_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Sanitizes and writes the tree. Never fails from the caller's view.
    pub fn save(&self, items: &[MenuItem]) {
        let sanitized = sanitize_tree(items.to_vec());
        let serialized = match serde_json::to_string(&sanitized) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to serialize menu items: {}", e);
                return;
            }
        };

        match self.storage.set_item(&self.key, &serialized) {
            Ok(()) => debug!("Saved {} root menu items under {}", sanitized.len(), self.key),
            Err(e) => error!("Failed to save menu items to storage: {}", e),
        }
    }

    /// Reads, validates and sanitizes the stored tree.
    ///
    /// Returns `None` when nothing is stored, the read fails, the content is
    /// not JSON, or it does not have the shape of a menu tree.
    pub fn load(&self) -> Option<MenuTree> {
        let raw = self.read()?;
        match parse_tree_str(&raw) {
            Ok(items) => Some(items),
            Err(e) => {
                warn!("Ignoring stored menu items: {}", e);
                None
            }
        }
    }

    /// Parsed but unvalidated stored content.
    pub fn load_raw(&self) -> Option<Value> {
        let raw = self.read()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored menu items are not valid JSON: {}", e);
                None
            }
        }
    }

    /// Removes the stored tree. The in-memory tree is not touched.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            error!("Failed to clear menu items from storage: {}", e);
        }
    }

    fn read(&self) -> Option<String> {
        match self.storage.get_item(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to load menu items from storage: {}", e);
                None
            }
        }
    }
}
