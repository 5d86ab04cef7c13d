//! Common types

use uuid::Uuid;

pub type MenuItemId = String;

/// Fresh menu item id. Random v4 uuids keep collisions out of reach for
/// ids created from independent editor sessions.
pub fn new_id() -> MenuItemId {
    Uuid::new_v4().to_string()
}
