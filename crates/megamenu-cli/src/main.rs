mod commands;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use megamenu_core::services::{initialize_app, HostService, MenuPersistence, MenuService};
use megamenu_core::state::AppState;
use megamenu_core::MenuItemForm;
use megamenu_infrastructure::{ConfiguredHost, FileStore};
use megamenu_shared::config::AppConfig;
use megamenu_shared::telemetry::init_telemetry;

use commands::EditArgs;

#[derive(Parser)]
#[command(name = "megamenu")]
#[command(about = "Manage the mega menu tree")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Storage file, overrides storage.path from config
    #[arg(short, long, env = "MEGAMENU_STORAGE_FILE")]
    storage: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the menu tree - Default
    Show {
        /// Print the stored JSON instead of the tree view
        #[arg(long)]
        json: bool,
    },
    /// Filter the tree by label
    Search { term: String },
    /// Add a menu item
    Add {
        label: String,
        /// Parent id; omit to add a root item
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Open the link inside the host instead of a new window
        #[arg(long)]
        open_in_teams: bool,
    },
    /// Edit a menu item
    Edit {
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long, conflicts_with = "clear_url")]
        url: Option<String>,
        #[arg(long, conflicts_with = "clear_icon")]
        icon: Option<String>,
        #[arg(long)]
        open_in_teams: Option<bool>,
        #[arg(long)]
        clear_url: bool,
        #[arg(long)]
        clear_icon: bool,
        /// New id for the item
        #[arg(long)]
        rename: Option<String>,
    },
    /// Delete a menu item and everything under it
    Delete { id: String },
    /// Replace the menu with a JSON file
    Import { path: PathBuf },
    /// Write the menu as JSON to a file or stdout
    Export { path: Option<PathBuf> },
    /// Forget the saved menu and restore the defaults
    Reset,
    /// Open the link of a menu item
    Open { id: String },
    /// Print theme and user taken from the host
    Context,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_telemetry(&config.logging)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    let storage_path = cli
        .storage
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.storage.path));
    let mut store = FileStore::open(&storage_path)
        .with_context(|| format!("Failed to open storage at {}", storage_path.display()))?;
    if let Some(quota) = config.storage.quota_bytes {
        store = store.with_quota(quota);
    }

    let persistence = MenuPersistence::with_key(Arc::new(store), config.storage.key.clone());
    let mut menu = MenuService::new(persistence, AppState::new());
    let host = HostService::new(Arc::new(ConfiguredHost::new(config.host.clone())));

    initialize_app(&mut menu, &host).await;
    menu.apply_pending_themes();

    let result = run(cli.command.unwrap_or(Commands::Show { json: false }), &mut menu, &host).await;
    match result {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            Err(e)
        }
    }
}

async fn run(
    command: Commands,
    menu: &mut MenuService<FileStore>,
    host: &HostService<ConfiguredHost>,
) -> anyhow::Result<String> {
    match command {
        Commands::Show { json } => commands::show(menu, json),
        Commands::Search { term } => Ok(commands::search(menu, &term)),
        Commands::Add {
            label,
            parent,
            url,
            icon,
            open_in_teams,
        } => {
            let form = MenuItemForm {
                label,
                url,
                icon,
                open_in_teams,
            };
            commands::add(menu, parent.as_deref(), form)
        }
        Commands::Edit {
            id,
            label,
            url,
            icon,
            open_in_teams,
            clear_url,
            clear_icon,
            rename,
        } => {
            let args = EditArgs {
                label,
                url,
                icon,
                open_in_teams,
                clear_url,
                clear_icon,
                rename,
            };
            commands::edit(menu, &id, args)
        }
        Commands::Delete { id } => commands::delete(menu, &id),
        Commands::Import { path } => commands::import(menu, &path),
        Commands::Export { path } => commands::export(menu, path.as_deref()),
        Commands::Reset => Ok(commands::reset(menu)),
        Commands::Open { id } => commands::open(menu, host, &id).await,
        Commands::Context => Ok(commands::context(menu)),
    }
}
