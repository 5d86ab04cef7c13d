// ============================================================================
// Mega Menu Core - Menu Service
// File: crates/megamenu-core/src/services/menu_service.rs
// ============================================================================
//! Owner of the application state. Collaborators (menu renderer, settings
//! editor) send every mutation through here; the service runs the pure tree
//! operation on a copy, checks the tree invariants, swaps the copy in and
//! persists it.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use megamenu_shared::constants::MENU_EVENT_CAPACITY;
use megamenu_shared::types::new_id;

use crate::domain::{FieldError, MenuItem, MenuItemForm, MenuItemPatch, MenuTree, Theme, User, MAX_DEPTH};
use crate::error::DomainError;
use crate::repositories::StorageRepository;
use crate::seed::default_menu;
use crate::services::event_bus::{EventBus, MenuEvent, StateEvent};
use crate::services::persistence::MenuPersistence;
use crate::state::AppState;
use crate::tree;
use crate::validation::{parse_tree_str, sanitize, sanitize_tree};

pub struct MenuService<S: StorageRepository> {
    state: AppState,
    persistence: MenuPersistence<S>,
    events: EventBus,
    theme_updates: Option<mpsc::UnboundedReceiver<Theme>>,
}

impl<S: StorageRepository> MenuService<S> {
    pub fn new(persistence: MenuPersistence<S>, state: AppState) -> Self {
        Self {
            state,
            persistence,
            events: EventBus::new(MENU_EVENT_CAPACITY),
            theme_updates: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.state.menu.items
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    /// Replaces the in-memory tree with the stored one when it is present
    /// and valid. Returns whether anything was restored.
    pub fn load_saved(&mut self) -> bool {
        let Some(items) = self.persistence.load() else {
            debug!("No saved menu, keeping current items");
            return false;
        };
        if let Err(e) = ensure_invariants(&items) {
            warn!("Saved menu rejected: {}", e);
            return false;
        }
        let count = items.len();
        self.state.menu.items = items;
        self.events.publish(MenuEvent::ItemsReplaced { count });
        info!("Restored {} root menu items from storage", count);
        true
    }

    /// Replaces the whole tree.
    pub fn set_items(&mut self, items: MenuTree) -> Result<(), DomainError> {
        let edit = tree::set_all(Vec::new(), sanitize_tree(items));
        let count = edit.tree.len();
        self.commit(edit.tree)?;
        self.events.publish(MenuEvent::ItemsReplaced { count });
        Ok(())
    }

    /// Validates serialized JSON and replaces the tree with it.
    pub fn import_json(&mut self, raw: &str) -> Result<usize, DomainError> {
        let items = parse_tree_str(raw)?;
        let count = tree::count(&items);
        self.set_items(items)?;
        info!("Imported {} menu items", count);
        Ok(count)
    }

    pub fn export_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string_pretty(&self.state.menu.items)?)
    }

    /// Appends an item to the roots or under `parent_id`.
    ///
    /// Rejects an unknown parent, an id that already exists, and any insert
    /// that would place a node deeper than `MAX_DEPTH`.
    pub fn add_item(&mut self, parent_id: Option<&str>, item: MenuItem) -> Result<(), DomainError> {
        let item = sanitize(item);
        let items = &self.state.menu.items;

        let depth = match parent_id {
            None => 0,
            Some(pid) => {
                tree::find_depth(items, pid).ok_or_else(|| DomainError::ParentNotFound(pid.to_string()))? + 1
            }
        };
        let deepest = depth + tree::subtree_height(&item);
        if deepest > MAX_DEPTH {
            warn!("Rejected insert of {}: depth {} exceeds {}", item.id, deepest, MAX_DEPTH);
            return Err(DomainError::DepthLimitExceeded {
                depth: deepest,
                max: MAX_DEPTH,
            });
        }

        let id = item.id.clone();
        let edit = tree::insert(items.clone(), parent_id, item);
        self.commit(edit.tree)?;
        self.events.publish(MenuEvent::ItemAdded {
            parent_id: parent_id.map(str::to_string),
            id: id.clone(),
        });
        info!("Added menu item {} under {:?}", id, parent_id);
        Ok(())
    }

    /// Validates editor input and adds it under a fresh id, which is returned.
    pub fn add_from_form(&mut self, parent_id: Option<&str>, form: MenuItemForm) -> Result<String, DomainError> {
        let id = new_id();
        let item = form.into_item(id.clone())?;
        self.add_item(parent_id, item)?;
        Ok(id)
    }

    /// Merges `patch` into the item. `Ok(false)` when the id is unknown.
    pub fn update_item(&mut self, id: &str, patch: &MenuItemPatch) -> Result<bool, DomainError> {
        let edit = tree::update(self.state.menu.items.clone(), id, patch);
        if !edit.applied {
            return Ok(false);
        }
        self.commit(sanitize_tree(edit.tree))?;
        self.events.publish(MenuEvent::ItemUpdated { id: id.to_string() });
        info!("Updated menu item {}", id);
        Ok(true)
    }

    /// Applies an edited form to an existing item.
    pub fn update_from_form(&mut self, id: &str, form: MenuItemForm) -> Result<bool, DomainError> {
        let patch = form.into_patch()?;
        self.update_item(id, &patch)
    }

    /// Removes the item and its subtree. `Ok(false)` when the id is unknown.
    pub fn delete_item(&mut self, id: &str) -> Result<bool, DomainError> {
        let edit = tree::delete(self.state.menu.items.clone(), id);
        if !edit.applied {
            return Ok(false);
        }
        self.commit(edit.tree)?;
        self.events.publish(MenuEvent::ItemDeleted { id: id.to_string() });
        info!("Deleted menu item {}", id);
        Ok(true)
    }

    /// Drops the stored copy and goes back to the built-in menu.
    pub fn reset(&mut self) {
        self.persistence.clear();
        self.state.menu.items = default_menu();
        self.events.publish(MenuEvent::MenuReset);
        info!("Menu reset to defaults");
    }

    /// Deletes the stored copy only; the in-memory tree stays as it is.
    pub fn clear_saved(&self) {
        self.persistence.clear();
    }

    /// Settings-editor search over the current tree.
    pub fn search(&self, term: &str) -> MenuTree {
        tree::filter_by_label(&self.state.menu.items, term)
    }

    pub fn find_depth(&self, id: &str) -> Option<usize> {
        tree::find_depth(&self.state.menu.items, id)
    }

    /// Whether the item may receive children without breaking the depth limit.
    pub fn can_add_child(&self, parent_id: &str) -> bool {
        self.find_depth(parent_id).is_some_and(|depth| depth < MAX_DEPTH)
    }

    pub fn set_hovered_item(&mut self, id: Option<String>) {
        self.state.menu.hovered_item = id;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.state.menu.is_loading = is_loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.state.menu.error = error;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.state.theme.current != theme {
            self.state.theme.current = theme;
            self.events.publish(MenuEvent::ThemeChanged { theme });
        }
    }

    pub fn set_host_theme(&mut self, is_host_theme: bool) {
        self.state.theme.is_host_theme = is_host_theme;
    }

    pub fn set_user(&mut self, user: Option<User>) {
        let user_id = user.as_ref().map(|u| u.id.clone());
        self.state.user.current_user = user;
        self.events.publish(MenuEvent::UserChanged { user_id });
    }

    pub fn set_initialized(&mut self, is_initialized: bool) {
        self.state.user.is_initialized = is_initialized;
    }

    /// Routes host theme changes into this state; see `apply_pending_themes`.
    pub fn attach_theme_updates(&mut self, updates: mpsc::UnboundedReceiver<Theme>) {
        self.theme_updates = Some(updates);
    }

    /// Applies queued host theme changes, returning how many were applied.
    pub fn apply_pending_themes(&mut self) -> usize {
        let mut pending = Vec::new();
        if let Some(rx) = self.theme_updates.as_mut() {
            while let Ok(theme) = rx.try_recv() {
                pending.push(theme);
            }
        }
        let applied = pending.len();
        for theme in pending {
            self.set_theme(theme);
        }
        applied
    }

    fn commit(&mut self, items: MenuTree) -> Result<(), DomainError> {
        ensure_invariants(&items)?;
        self.persistence.save(&items);
        self.state.menu.items = items;
        self.drop_stale_hover();
        Ok(())
    }

    /// Hover must point at a node that still exists after deletes and renames.
    fn drop_stale_hover(&mut self) {
        let stale = self
            .state
            .menu
            .hovered_item
            .as_deref()
            .is_some_and(|hovered| tree::find(&self.state.menu.items, hovered).is_none());
        if stale {
            self.state.menu.hovered_item = None;
        }
    }
}

/// First node in pre-order whose own content breaks the item rules.
fn first_invalid_node(items: &[MenuItem]) -> Option<(&str, Vec<FieldError>)> {
    items.iter().find_map(|item| {
        let errors = item.content_errors();
        if errors.is_empty() {
            first_invalid_node(item.child_items())
        } else {
            Some((item.id.as_str(), errors))
        }
    })
}

/// Tree-wide rules: labels present, urls absolute, ids unique, nothing
/// deeper than `MAX_DEPTH`.
fn ensure_invariants(items: &[MenuItem]) -> Result<(), DomainError> {
    if let Some((id, errors)) = first_invalid_node(items) {
        return Err(DomainError::InvalidItem {
            id: id.to_string(),
            errors,
        });
    }
    if let Some(duplicate) = tree::duplicate_ids(items).into_iter().next() {
        return Err(DomainError::DuplicateId(duplicate));
    }
    if let Some(depth) = tree::max_depth(items) {
        if depth > MAX_DEPTH {
            return Err(DomainError::DepthLimitExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::repositories::MockStorageRepository;
    use std::sync::{Arc, Mutex};

    fn quiet_storage() -> MockStorageRepository {
        let mut storage = MockStorageRepository::new();
        storage.expect_set_item().returning(|_, _| Ok(()));
        storage.expect_remove_item().returning(|_| Ok(()));
        storage.expect_get_item().returning(|_| Ok(None));
        storage
    }

    fn service(items: MenuTree) -> MenuService<MockStorageRepository> {
        MenuService::new(
            MenuPersistence::new(Arc::new(quiet_storage())),
            AppState::with_items(items),
        )
    }

    fn chain() -> MenuTree {
        vec![MenuItem::new("root", "Root").with_children(vec![MenuItem::new("a", "A")
            .with_children(vec![MenuItem::new("b", "B").with_children(vec![MenuItem::new("c", "C")])])])]
    }

    #[test]
    fn test_add_item_rejects_past_depth_limit() {
        let mut svc = service(chain());
        let err = svc.add_item(Some("c"), MenuItem::new("d", "D")).unwrap_err();
        assert!(matches!(err, DomainError::DepthLimitExceeded { depth: 4, max: 3 }));
        assert_eq!(svc.items(), chain().as_slice());
        assert!(!svc.can_add_child("c"));
        assert!(svc.can_add_child("b"));
    }

    #[test]
    fn test_add_item_counts_subtree_height() {
        let mut svc = service(chain());
        let nested = MenuItem::new("x", "X").with_children(vec![MenuItem::new("y", "Y")]);
        let err = svc.add_item(Some("b"), nested).unwrap_err();
        assert!(matches!(err, DomainError::DepthLimitExceeded { depth: 4, .. }));
    }

    #[test]
    fn test_add_item_rejects_unknown_parent_and_duplicates() {
        let mut svc = service(chain());
        assert!(matches!(
            svc.add_item(Some("nope"), MenuItem::new("z", "Z")),
            Err(DomainError::ParentNotFound(_))
        ));
        assert!(matches!(
            svc.add_item(None, MenuItem::new("a", "Again")),
            Err(DomainError::DuplicateId(id)) if id == "a"
        ));
    }

    #[test]
    fn test_add_item_sanitizes_and_persists() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = written.clone();
        let mut storage = MockStorageRepository::new();
        storage.expect_set_item().times(1).returning(move |_, value| {
            sink.lock().unwrap().push(value.to_string());
            Ok(())
        });
        let mut svc = MenuService::new(MenuPersistence::new(Arc::new(storage)), AppState::with_items(vec![]));

        svc.add_item(None, MenuItem::new(" new ", "  Trimmed  ")).unwrap();
        assert_eq!(svc.items(), &[MenuItem::new("new", "Trimmed")]);
        assert!(written.lock().unwrap()[0].contains(r#""label":"Trimmed""#));
    }

    #[test]
    fn test_failed_save_keeps_mutation_in_memory() {
        let mut storage = MockStorageRepository::new();
        storage
            .expect_set_item()
            .returning(|_, _| Err(StorageError::QuotaExceeded("full".into())));
        let mut svc = MenuService::new(MenuPersistence::new(Arc::new(storage)), AppState::with_items(vec![]));

        assert!(svc.add_item(None, MenuItem::new("1", "One")).is_ok());
        assert_eq!(svc.items().len(), 1);
    }

    #[test]
    fn test_unknown_ids_are_silent_noops() {
        let mut svc = service(chain());
        assert!(!svc.update_item("missing", &MenuItemPatch::new().label("x")).unwrap());
        assert!(!svc.delete_item("missing").unwrap());
        assert_eq!(svc.items(), chain().as_slice());
    }

    #[test]
    fn test_update_rejects_rename_onto_existing_id() {
        let mut svc = service(chain());
        let err = svc.update_item("c", &MenuItemPatch::new().rename("a")).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateId(id) if id == "a"));
        assert_eq!(svc.items(), chain().as_slice());
    }

    #[test]
    fn test_update_from_form_validates_input() {
        let mut svc = service(chain());
        let err = svc.update_from_form("a", MenuItemForm::new(" ")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidForm(_)));

        assert!(svc.update_from_form("a", MenuItemForm::new("Renamed")).unwrap());
        assert_eq!(tree::find(svc.items(), "a").unwrap().label, "Renamed");
    }

    #[test]
    fn test_delete_clears_hover_and_publishes() {
        let mut svc = service(chain());
        let mut rx = svc.subscribe();
        svc.set_hovered_item(Some("b".to_string()));

        assert!(svc.delete_item("b").unwrap());
        assert!(svc.state().menu.hovered_item.is_none());
        assert!(svc.find_depth("c").is_none());
        assert_eq!(rx.try_recv().unwrap().event, MenuEvent::ItemDeleted { id: "b".into() });
    }

    #[test]
    fn test_delete_of_ancestor_clears_hover_on_descendant() {
        let mut svc = service(chain());
        svc.set_hovered_item(Some("c".to_string()));

        assert!(svc.delete_item("a").unwrap());
        assert!(svc.state().menu.hovered_item.is_none());
    }

    #[test]
    fn test_hover_follows_surviving_nodes() {
        let mut svc = service(chain());
        svc.set_hovered_item(Some("c".to_string()));
        assert!(svc.update_item("c", &MenuItemPatch::new().rename("c2")).unwrap());
        assert!(svc.state().menu.hovered_item.is_none());

        svc.set_hovered_item(Some("root".to_string()));
        assert!(svc.delete_item("b").unwrap());
        assert_eq!(svc.state().menu.hovered_item.as_deref(), Some("root"));
    }

    #[test]
    fn test_blank_labels_and_relative_urls_never_commit() {
        let mut svc = service(chain());

        let err = svc
            .add_item(None, MenuItem::new("x", "   ").with_url("not a url"))
            .unwrap_err();
        match err {
            DomainError::InvalidItem { id, errors } => {
                assert_eq!(id, "x");
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["label", "url"]);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            svc.update_item("b", &MenuItemPatch::new().label("\t")),
            Err(DomainError::InvalidItem { id, .. }) if id == "b"
        ));
        assert!(matches!(
            svc.update_item("c", &MenuItemPatch::new().url(Some("/relative".into()))),
            Err(DomainError::InvalidItem { id, .. }) if id == "c"
        ));
        assert!(matches!(
            svc.import_json(r#"[{"id":"y","label":"  ","url":"nope"}]"#),
            Err(DomainError::InvalidItem { .. })
        ));
        assert_eq!(svc.items(), chain().as_slice());

        svc.add_item(Some("a"), MenuItem::new("ok", "Docs").with_url("https://example.com/docs"))
            .unwrap();
        assert!(svc.update_item("ok", &MenuItemPatch::new().url(None)).unwrap());
    }

    #[test]
    fn test_load_saved_rejects_blank_labels() {
        let mut storage = MockStorageRepository::new();
        storage
            .expect_get_item()
            .returning(|_| Ok(Some(r#"[{"id":"1","label":" "}]"#.to_string())));
        let mut svc = MenuService::new(MenuPersistence::new(Arc::new(storage)), AppState::with_items(chain()));

        assert!(!svc.load_saved());
        assert_eq!(svc.items(), chain().as_slice());
    }

    #[test]
    fn test_set_items_rejects_duplicates_and_deep_trees() {
        let mut svc = service(vec![]);
        let dupes = vec![MenuItem::new("1", "A"), MenuItem::new("1", "B")];
        assert!(matches!(svc.set_items(dupes), Err(DomainError::DuplicateId(_))));

        let mut deep = chain();
        deep[0].children.as_mut().unwrap()[0].children.as_mut().unwrap()[0]
            .children
            .as_mut()
            .unwrap()[0]
            .push_child(MenuItem::new("d", "D"));
        assert!(matches!(svc.set_items(deep), Err(DomainError::DepthLimitExceeded { .. })));
        assert!(svc.items().is_empty());

        svc.set_items(Vec::new()).unwrap();
        assert!(svc.items().is_empty());
    }

    #[test]
    fn test_import_json_validates() {
        let mut svc = service(vec![]);
        assert!(matches!(svc.import_json("invalid json"), Err(DomainError::Validation(_))));
        assert!(matches!(
            svc.import_json(r#"[{"label":"no id"}]"#),
            Err(DomainError::Validation(_))
        ));

        let count = svc
            .import_json(r#"[{"id":" 1 ","label":"One","children":[{"id":"2","label":"Two"}]}]"#)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(svc.items()[0].id, "1");
    }

    #[test]
    fn test_theme_updates_are_applied_from_channel() {
        let mut svc = service(vec![]);
        let (tx, rx) = mpsc::unbounded_channel();
        svc.attach_theme_updates(rx);
        tx.send(Theme::Dark).unwrap();
        tx.send(Theme::Contrast).unwrap();

        assert_eq!(svc.apply_pending_themes(), 2);
        assert_eq!(svc.state().theme.current, Theme::Contrast);
        assert_eq!(svc.apply_pending_themes(), 0);
    }

    #[test]
    fn test_reset_restores_seed_and_clear_saved_keeps_memory() {
        let mut svc = service(vec![]);
        svc.clear_saved();
        assert!(svc.items().is_empty());

        svc.reset();
        assert_eq!(svc.items(), default_menu().as_slice());
    }
}
