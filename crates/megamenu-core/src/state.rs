//! Application state container.
//!
//! One `AppState` is created by the composition root and owned by
//! `MenuService`. The tree inside is only ever replaced wholesale with the
//! result of a tree-engine call.

use crate::domain::{MenuTree, Theme, User};
use crate::seed::default_menu;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub items: MenuTree,
    pub is_loading: bool,
    pub error: Option<String>,
    pub hovered_item: Option<String>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            items: default_menu(),
            is_loading: false,
            error: None,
            hovered_item: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub current: Theme,
    /// True when the theme is driven by the host application.
    pub is_host_theme: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub current_user: Option<User>,
    pub is_initialized: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub menu: MenuState,
    pub theme: ThemeState,
    pub user: UserState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with a given tree instead of the built-in default.
    pub fn with_items(items: MenuTree) -> Self {
        Self {
            menu: MenuState {
                items,
                ..MenuState::default()
            },
            ..Self::default()
        }
    }
}
