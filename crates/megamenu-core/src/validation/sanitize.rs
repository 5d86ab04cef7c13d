//! Whitespace normalization applied before data is committed or persisted.

use crate::domain::{MenuItem, MenuTree};

/// Trims `id`, `label`, `url` and `icon`, recursing into children.
/// Absent optionals stay absent; `children: None` is not turned into `[]`.
pub fn sanitize(item: MenuItem) -> MenuItem {
    MenuItem {
        id: item.id.trim().to_string(),
        label: item.label.trim().to_string(),
        url: item.url.map(|url| url.trim().to_string()),
        icon: item.icon.map(|icon| icon.trim().to_string()),
        open_in_teams: item.open_in_teams,
        children: item.children.map(sanitize_tree),
    }
}

pub fn sanitize_tree(items: MenuTree) -> MenuTree {
    items.into_iter().map(sanitize).collect()
}
