//! Key-value storage port

#[cfg(test)]
use mockall::automock;

use crate::error::StorageError;

/// Durable string key-value storage, shaped like browser local storage.
#[cfg_attr(test, automock)]
pub trait StorageRepository: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
