// ============================================================================
// Mega Menu Core - Tree Engine
// File: crates/megamenu-core/src/tree/mod.rs
// Description: Pure recursive operations over the menu tree
// ============================================================================
//! Every mutation takes the tree by value and hands back a new tree plus an
//! `applied` flag. Lookups are depth-first pre-order: a node, then its
//! children, then its next sibling. When ids collide only the first node
//! met in that order is touched. Unknown ids are silent no-ops.

mod query;

pub use query::{
    collect_ids, count, duplicate_ids, filter_by_label, find, find_depth, max_depth,
    subtree_height,
};

use tracing::debug;

use crate::domain::{MenuItem, MenuItemPatch, MenuTree};

/// Result of a tree mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEdit {
    pub tree: MenuTree,
    /// False when the target id was not found and the tree is unchanged.
    pub applied: bool,
}

impl TreeEdit {
    fn applied(tree: MenuTree) -> Self {
        Self { tree, applied: true }
    }

    fn unchanged(tree: MenuTree) -> Self {
        Self { tree, applied: false }
    }
}

/// Replaces the whole tree. No validation happens here.
pub fn set_all(_tree: MenuTree, new_tree: MenuTree) -> TreeEdit {
    TreeEdit::applied(new_tree)
}

/// Appends `item` to the roots, or to the children of the first node whose
/// id equals `parent_id`. Depth is not checked here; see
/// `MenuService::add_item` for the guarded variant.
pub fn insert(mut tree: MenuTree, parent_id: Option<&str>, item: MenuItem) -> TreeEdit {
    let Some(parent_id) = parent_id else {
        tree.push(item);
        return TreeEdit::applied(tree);
    };

    let mut pending = Some(item);
    if append_child(&mut tree, parent_id, &mut pending) {
        TreeEdit::applied(tree)
    } else {
        debug!("Insert skipped, parent {} not found", parent_id);
        TreeEdit::unchanged(tree)
    }
}

fn append_child(items: &mut [MenuItem], parent_id: &str, pending: &mut Option<MenuItem>) -> bool {
    for node in items.iter_mut() {
        if node.id == parent_id {
            if let Some(item) = pending.take() {
                node.push_child(item);
            }
            return true;
        }
        if let Some(children) = node.children.as_mut() {
            if append_child(children, parent_id, pending) {
                return true;
            }
        }
    }
    false
}

/// Merges `patch` into the first node whose id equals `id`.
pub fn update(mut tree: MenuTree, id: &str, patch: &MenuItemPatch) -> TreeEdit {
    if patch_first(&mut tree, id, patch) {
        TreeEdit::applied(tree)
    } else {
        debug!("Update skipped, item {} not found", id);
        TreeEdit::unchanged(tree)
    }
}

fn patch_first(items: &mut [MenuItem], id: &str, patch: &MenuItemPatch) -> bool {
    for node in items.iter_mut() {
        if node.id == id {
            patch.apply_to(node);
            return true;
        }
        if let Some(children) = node.children.as_mut() {
            if patch_first(children, id, patch) {
                return true;
            }
        }
    }
    false
}

/// Removes the first node whose id equals `id`, together with its subtree.
/// Remaining siblings keep their relative order.
pub fn delete(mut tree: MenuTree, id: &str) -> TreeEdit {
    match remove_first(&mut tree, id) {
        Some(_) => TreeEdit::applied(tree),
        None => {
            debug!("Delete skipped, item {} not found", id);
            TreeEdit::unchanged(tree)
        }
    }
}

fn remove_first(items: &mut Vec<MenuItem>, id: &str) -> Option<MenuItem> {
    for index in 0..items.len() {
        if items[index].id == id {
            return Some(items.remove(index));
        }
        if let Some(children) = items[index].children.as_mut() {
            if let Some(removed) = remove_first(children, id) {
                return Some(removed);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuTree {
        vec![
            MenuItem::new("1", "Get Menu Item 1")
                .with_url("https://example.com/item1")
                .with_children(vec![MenuItem::new("1-1", "My Career and Benefits")
                    .with_url("https://example.com/career")
                    .with_children(vec![MenuItem::new("1-1-1", "Career Development")])]),
            MenuItem::new("2", "Get Menu Item 2"),
        ]
    }

    fn child_ids(item: &MenuItem) -> Vec<&str> {
        item.child_items().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_set_all_replaces_everything() {
        let edit = set_all(sample(), vec![MenuItem::new("x", "Only")]);
        assert!(edit.applied);
        assert_eq!(edit.tree, vec![MenuItem::new("x", "Only")]);

        let cleared = set_all(sample(), Vec::new());
        assert!(cleared.tree.is_empty());
    }

    #[test]
    fn test_insert_root_appends_last() {
        let edit = insert(sample(), None, MenuItem::new("3", "Third"));
        assert!(edit.applied);
        let ids: Vec<&str> = edit.tree.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_insert_child_appends_after_existing_children() {
        let edit = insert(sample(), Some("1"), MenuItem::new("1-1-new", "New Child"));
        assert!(edit.applied);
        assert_eq!(child_ids(&edit.tree[0]), vec!["1-1", "1-1-new"]);
    }

    #[test]
    fn test_insert_creates_children_on_leaf() {
        let edit = insert(sample(), Some("2"), MenuItem::new("2-1", "IT Services"));
        assert_eq!(edit.tree[1].children, Some(vec![MenuItem::new("2-1", "IT Services")]));
    }

    #[test]
    fn test_insert_under_missing_parent_is_noop() {
        let edit = insert(sample(), Some("missing"), MenuItem::new("z", "Lost"));
        assert!(!edit.applied);
        assert_eq!(edit.tree, sample());
    }

    #[test]
    fn test_update_changes_only_named_fields() {
        let edit = update(sample(), "1-1", &MenuItemPatch::new().label("Updated"));
        assert!(edit.applied);
        let node = find(&edit.tree, "1-1").unwrap();
        assert_eq!(node.label, "Updated");
        assert_eq!(node.url.as_deref(), Some("https://example.com/career"));
        assert_eq!(child_ids(node), vec!["1-1-1"]);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let edit = update(sample(), "nope", &MenuItemPatch::new().label("x"));
        assert!(!edit.applied);
        assert_eq!(edit.tree, sample());
    }

    #[test]
    fn test_delete_removes_subtree_and_keeps_order() {
        let mut tree = sample();
        tree.insert(1, MenuItem::new("mid", "Middle"));
        let edit = delete(tree, "mid");
        assert!(edit.applied);
        let ids: Vec<&str> = edit.tree.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let edit = delete(edit.tree, "1-1");
        assert!(find_depth(&edit.tree, "1-1-1").is_none());
        assert_eq!(edit.tree[0].children, Some(vec![]));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let edit = delete(sample(), "nope");
        assert!(!edit.applied);
        assert_eq!(edit.tree, sample());
    }

    #[test]
    fn test_duplicate_ids_touch_first_in_preorder_only() {
        // "dup" appears as a grandchild of root 0 and as root 1; pre-order
        // reaches the grandchild first.
        let tree = vec![
            MenuItem::new("a", "A").with_children(vec![MenuItem::new("dup", "Deep")]),
            MenuItem::new("dup", "Shallow"),
        ];

        let updated = update(tree.clone(), "dup", &MenuItemPatch::new().label("Changed"));
        assert_eq!(updated.tree[0].child_items()[0].label, "Changed");
        assert_eq!(updated.tree[1].label, "Shallow");

        let inserted = insert(tree.clone(), Some("dup"), MenuItem::new("c", "C"));
        assert_eq!(child_ids(&inserted.tree[0].child_items()[0]), vec!["c"]);
        assert!(inserted.tree[1].children.is_none());

        let deleted = delete(tree.clone(), "dup");
        assert_eq!(deleted.tree[0].children, Some(vec![]));
        assert_eq!(deleted.tree[1].label, "Shallow");

        assert_eq!(find_depth(&tree, "dup"), Some(1));
    }
}
