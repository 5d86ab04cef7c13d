// ============================================================================
// Mega Menu Core - Host Service
// File: crates/megamenu-core/src/services/host_service.rs
// ============================================================================
//! Wraps the host SDK port. Every failure ends here: it is logged and the
//! caller sees `false`, `None` or a fallback, never an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::{HostContext, Theme};
use crate::repositories::HostRepository;

pub struct HostService<H: HostRepository> {
    host: Arc<H>,
    initialized: AtomicBool,
}

impl<H: HostRepository> HostService<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self {
            host,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn is_running_in_host(&self) -> bool {
        self.host.is_embedded()
    }

    /// Initializes the SDK once. Later calls return `true` without touching
    /// the host; a failed attempt is retried next time.
    pub async fn initialize(&self) -> bool {
        if self.initialized.load(Ordering::Acquire) {
            return true;
        }
        match self.host.initialize().await {
            Ok(()) => {
                self.initialized.store(true, Ordering::Release);
                info!("Host SDK initialized");
                true
            }
            Err(e) => {
                error!("Failed to initialize host SDK: {}", e);
                false
            }
        }
    }

    pub async fn get_context(&self) -> Option<HostContext> {
        if !self.initialize().await {
            return None;
        }
        match self.host.context().await {
            Ok(payload) => Some(HostContext::from(payload)),
            Err(e) => {
                error!("Failed to get host context: {}", e);
                None
            }
        }
    }

    /// Subscribes `callback` to host theme changes, already mapped to `Theme`.
    pub async fn register_theme_change_handler<F>(&self, callback: F) -> bool
    where
        F: Fn(Theme) + Send + Sync + 'static,
    {
        if !self.initialize().await {
            return false;
        }
        let handler = Box::new(move |name: String| callback(Theme::from_host(&name)));
        match self.host.on_theme_change(handler).await {
            Ok(()) => {
                debug!("Theme change handler registered");
                true
            }
            Err(e) => {
                error!("Failed to register theme change handler: {}", e);
                false
            }
        }
    }

    /// Opens a menu link.
    ///
    /// The host is always asked to navigate first, whatever `open_in_host`
    /// says. A host that cannot be initialized or fails to navigate falls back
    /// to an external window.
    pub async fn open_link(&self, url: &str, open_in_host: bool) {
        debug!("Opening {} (open in host: {})", url, open_in_host);
        if !self.initialize().await {
            warn!("Host unavailable, opening {} externally", url);
            self.host.open_external(url);
            return;
        }
        if let Err(e) = self.host.navigate_to_tab(url).await {
            error!("Failed to open link in host: {}", e);
            self.host.open_external(url);
        }
    }
}
