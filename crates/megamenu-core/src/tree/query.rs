//! Read-only lookups over the menu tree.

use std::collections::HashSet;

use crate::domain::{MenuItem, MenuTree};

/// First node with the given id, in pre-order.
pub fn find<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    for node in items {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(node.child_items(), id) {
            return Some(found);
        }
    }
    None
}

/// 0-based depth of the first node with the given id; `None` when absent.
pub fn find_depth(items: &[MenuItem], id: &str) -> Option<usize> {
    depth_from(items, id, 0)
}

fn depth_from(items: &[MenuItem], id: &str, depth: usize) -> Option<usize> {
    for node in items {
        if node.id == id {
            return Some(depth);
        }
        if let Some(found) = depth_from(node.child_items(), id, depth + 1) {
            return Some(found);
        }
    }
    None
}

/// Number of edges from `item` down to its deepest descendant.
pub fn subtree_height(item: &MenuItem) -> usize {
    item.child_items()
        .iter()
        .map(|child| 1 + subtree_height(child))
        .max()
        .unwrap_or(0)
}

/// Depth of the deepest node in the tree; `None` for an empty tree.
pub fn max_depth(items: &[MenuItem]) -> Option<usize> {
    items.iter().map(subtree_height).max()
}

pub fn count(items: &[MenuItem]) -> usize {
    items.iter().map(|node| 1 + count(node.child_items())).sum()
}

/// All ids in pre-order, duplicates included.
pub fn collect_ids(items: &[MenuItem]) -> Vec<&str> {
    let mut ids = Vec::new();
    push_ids(items, &mut ids);
    ids
}

fn push_ids<'a>(items: &'a [MenuItem], ids: &mut Vec<&'a str>) {
    for node in items {
        ids.push(node.id.as_str());
        push_ids(node.child_items(), ids);
    }
}

/// Ids that occur more than once, each reported once in order of their
/// second occurrence.
pub fn duplicate_ids(items: &[MenuItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for id in collect_ids(items) {
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.to_string());
        }
    }
    duplicates
}

/// Per-level, case-insensitive label search used by the settings editor.
///
/// A node is kept when its label contains `term`; its children are then
/// filtered the same way. A node that does not match hides its subtree.
/// A blank term keeps the whole tree.
pub fn filter_by_label(items: &[MenuItem], term: &str) -> MenuTree {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    filter_level(items, &needle)
}

fn filter_level(items: &[MenuItem], needle: &str) -> MenuTree {
    items
        .iter()
        .filter(|node| node.label.to_lowercase().contains(needle))
        .map(|node| MenuItem {
            children: node.children.as_ref().map(|c| filter_level(c, needle)),
            ..node.clone()
        })
        .collect()
}
