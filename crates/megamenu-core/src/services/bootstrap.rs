//! Application startup sequence.

use tokio::sync::mpsc;
use tracing::{info, warn};

use megamenu_shared::utils::mask_email;

use crate::domain::Theme;
use crate::repositories::{HostRepository, StorageRepository};
use crate::services::host_service::HostService;
use crate::services::menu_service::MenuService;

/// Restores the saved menu and pulls theme and user from the host.
///
/// Nothing here fails: a missing tree keeps the seed, a missing host context
/// keeps the defaults. The state always ends up initialized.
pub async fn initialize_app<S, H>(menu: &mut MenuService<S>, host: &HostService<H>)
where
    S: StorageRepository,
    H: HostRepository,
{
    menu.set_loading(true);
    menu.load_saved();

    let embedded = host.is_running_in_host();
    menu.set_host_theme(embedded);

    if embedded {
        match host.get_context().await {
            Some(context) => {
                if let Some(user) = &context.user {
                    let email = user.email.as_deref().map(mask_email).unwrap_or_default();
                    info!("Host user {} {}", user.display_name, email);
                }
                menu.set_theme(context.theme);
                menu.set_user(context.user);
            }
            None => warn!("Running in host but no context is available"),
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let registered = host
            .register_theme_change_handler(move |theme| {
                let _ = tx.send(theme);
            })
            .await;
        if registered {
            menu.attach_theme_updates(rx);
        }
    } else {
        menu.set_theme(Theme::Light);
    }

    menu.set_loading(false);
    menu.set_initialized(true);
    info!(
        "App initialized (embedded: {}, theme: {}, items: {})",
        embedded,
        menu.state().theme.current,
        menu.items().len()
    );
}
