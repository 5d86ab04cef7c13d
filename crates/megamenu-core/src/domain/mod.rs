//! # Mega Menu Core - Domain Module
//!
//! Domain entities for the mega menu.

pub mod menu_item;
pub mod menu_item_form;
pub mod host;

// Re-export all entities
pub use menu_item::{MenuItem, MenuItemPatch, MenuTree, MAX_DEPTH};
pub use menu_item_form::{FieldError, MenuItemForm};
pub use host::{HostContext, HostContextPayload, HostUserPayload, Theme, User};
