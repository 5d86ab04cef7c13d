//! Application-wide constants

/// Storage key the serialized menu tree is written under.
pub const MENU_STORAGE_KEY: &str = "teams-mega-menu-config";
/// Deepest level a menu item may live at (root = 0).
pub const MAX_MENU_DEPTH: usize = 3;
pub const DEFAULT_STORAGE_FILE: &str = "data/megamenu-storage.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const UNKNOWN_USER_DISPLAY_NAME: &str = "Unknown User";
pub const MENU_EVENT_CAPACITY: usize = 64;
