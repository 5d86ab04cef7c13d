//! Command handlers. Each returns the text to print.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use tracing::info;

use megamenu_core::repositories::{HostRepository, StorageRepository};
use megamenu_core::services::{HostService, MenuService};
use megamenu_core::{tree, MenuItemForm};

use crate::render::{render_context, render_tree};

/// Optional field changes for `edit`; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub label: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub open_in_teams: Option<bool>,
    pub clear_url: bool,
    pub clear_icon: bool,
    pub rename: Option<String>,
}

pub fn show<S: StorageRepository>(menu: &MenuService<S>, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(menu.export_json()? + "\n");
    }
    Ok(render_tree(menu.items()))
}

pub fn search<S: StorageRepository>(menu: &MenuService<S>, term: &str) -> String {
    render_tree(&menu.search(term))
}

pub fn add<S: StorageRepository>(
    menu: &mut MenuService<S>,
    parent: Option<&str>,
    form: MenuItemForm,
) -> anyhow::Result<String> {
    let id = menu.add_from_form(parent, form)?;
    Ok(format!("Added {}\n", id))
}

pub fn edit<S: StorageRepository>(menu: &mut MenuService<S>, id: &str, args: EditArgs) -> anyhow::Result<String> {
    let current = tree::find(menu.items(), id).ok_or_else(|| anyhow!("No menu item with id {}", id))?;

    let mut form = MenuItemForm::from_item(current);
    if let Some(label) = args.label {
        form.label = label;
    }
    if args.clear_url {
        form.url = None;
    } else if let Some(url) = args.url {
        form.url = Some(url);
    }
    if args.clear_icon {
        form.icon = None;
    } else if let Some(icon) = args.icon {
        form.icon = Some(icon);
    }
    if let Some(open_in_teams) = args.open_in_teams {
        form.open_in_teams = open_in_teams;
    }

    let mut patch = form.into_patch().map_err(megamenu_core::DomainError::from)?;
    if let Some(new_id) = args.rename {
        patch = patch.rename(new_id);
    }
    menu.update_item(id, &patch)?;
    Ok(format!("Updated {}\n", id))
}

pub fn delete<S: StorageRepository>(menu: &mut MenuService<S>, id: &str) -> anyhow::Result<String> {
    if !menu.delete_item(id)? {
        bail!("No menu item with id {}", id);
    }
    Ok(format!("Deleted {}\n", id))
}

pub fn import<S: StorageRepository>(menu: &mut MenuService<S>, path: &Path) -> anyhow::Result<String> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let count = menu.import_json(&raw)?;
    Ok(format!("Imported {} items from {}\n", count, path.display()))
}

pub fn export<S: StorageRepository>(menu: &MenuService<S>, path: Option<&Path>) -> anyhow::Result<String> {
    let json = menu.export_json()?;
    match path {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported menu to {}", path.display());
            Ok(format!("Exported to {}\n", path.display()))
        }
        None => Ok(json + "\n"),
    }
}

pub fn reset<S: StorageRepository>(menu: &mut MenuService<S>) -> String {
    menu.reset();
    "Menu reset to defaults\n".to_string()
}

pub async fn open<S, H>(menu: &MenuService<S>, host: &HostService<H>, id: &str) -> anyhow::Result<String>
where
    S: StorageRepository,
    H: HostRepository,
{
    let item = tree::find(menu.items(), id).ok_or_else(|| anyhow!("No menu item with id {}", id))?;
    let url = item
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("Menu item {} has no url", id))?;
    host.open_link(url, item.open_in_teams).await;
    Ok(format!("Opened {}\n", url))
}

pub fn context<S: StorageRepository>(menu: &MenuService<S>) -> String {
    render_context(menu.state())
}
