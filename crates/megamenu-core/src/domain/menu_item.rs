// ============================================================================
// Mega Menu Core - Menu Item Entity
// File: crates/megamenu-core/src/domain/menu_item.rs
// Description: Recursive menu node and partial-update record
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use super::menu_item_form::{FieldError, INVALID_URL, LABEL_REQUIRED};

/// Ordered sequence of root-level menu items.
pub type MenuTree = Vec<MenuItem>;

/// Deepest level an item may live at. Roots are depth 0, so a tree has at
/// most four levels.
pub const MAX_DEPTH: usize = megamenu_shared::constants::MAX_MENU_DEPTH;

/// One node of the menu tree.
///
/// `id` is expected to be unique across the whole tree. `children` keeps
/// display order; `None` and `Some(vec![])` both mean "leaf" when looking
/// nodes up, but the distinction survives serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub open_in_teams: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: None,
            icon: None,
            open_in_teams: false,
            children: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn opening_in_teams(mut self) -> Self {
        self.open_in_teams = true;
        self
    }

    /// Children as a slice; an absent sequence reads as empty.
    pub fn child_items(&self) -> &[MenuItem] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.child_items().is_empty()
    }

    /// Content rules for this node alone: the label must not be blank and a
    /// non-blank url must be absolute. Children are not inspected.
    pub fn content_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.label.trim().is_empty() {
            errors.push(FieldError::new("label", LABEL_REQUIRED));
        }
        if let Some(url) = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            if !url.validate_url() {
                errors.push(FieldError::new("url", INVALID_URL));
            }
        }
        errors
    }

    /// Appends a child, creating the children sequence on first use.
    pub fn push_child(&mut self, child: MenuItem) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }
}

/// Partial update for a single node. Only fields set to `Some` are written.
///
/// `url`, `icon` and `children` are nested options so a patch can clear
/// them (`Some(None)`) as well as replace them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemPatch {
    pub id: Option<String>,
    pub label: Option<String>,
    pub url: Option<Option<String>>,
    pub icon: Option<Option<String>>,
    pub open_in_teams: Option<bool>,
    pub children: Option<Option<Vec<MenuItem>>>,
}

impl MenuItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn url(mut self, url: Option<String>) -> Self {
        self.url = Some(url);
        self
    }

    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn open_in_teams(mut self, open_in_teams: bool) -> Self {
        self.open_in_teams = Some(open_in_teams);
        self
    }

    pub fn children(mut self, children: Option<Vec<MenuItem>>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn rename(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, item: &mut MenuItem) {
        if let Some(id) = &self.id {
            item.id = id.clone();
        }
        if let Some(label) = &self.label {
            item.label = label.clone();
        }
        if let Some(url) = &self.url {
            item.url = url.clone();
        }
        if let Some(icon) = &self.icon {
            item.icon = icon.clone();
        }
        if let Some(open_in_teams) = self.open_in_teams {
            item.open_in_teams = open_in_teams;
        }
        if let Some(children) = &self.children {
            item.children = children.clone();
        }
    }
}
