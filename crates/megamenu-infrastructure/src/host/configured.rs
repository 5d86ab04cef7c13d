// ============================================================================
// Mega Menu Infrastructure - Configured Host
// File: crates/megamenu-infrastructure/src/host/configured.rs
// ============================================================================
//! Host adapter driven by configuration.
//!
//! Outside a real host (`host.embedded = false`) every host call fails and
//! links go to the launcher. With `embedded = true` the configured theme and
//! user are reported as the host context, and tab navigation is accepted.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{error, info};

use megamenu_core::domain::{HostContextPayload, HostUserPayload};
use megamenu_core::error::HostError;
use megamenu_core::repositories::{HostRepository, ThemeChangeHandler};
use megamenu_shared::config::HostSettings;

use super::browser::{Launcher, SystemBrowser};

pub struct ConfiguredHost<L: Launcher = SystemBrowser> {
    settings: HostSettings,
    launcher: L,
    initialized: AtomicBool,
    theme_handlers: Mutex<Vec<ThemeChangeHandler>>,
    navigations: Mutex<Vec<String>>,
}

impl ConfiguredHost<SystemBrowser> {
    pub fn new(settings: HostSettings) -> Self {
        Self::with_launcher(settings, SystemBrowser)
    }
}

impl<L: Launcher> ConfiguredHost<L> {
    pub fn with_launcher(settings: HostSettings, launcher: L) -> Self {
        Self {
            settings,
            launcher,
            initialized: AtomicBool::new(false),
            theme_handlers: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    /// Delivers a theme change to every registered handler, as the host
    /// would. Returns how many handlers were called.
    pub fn emit_theme_change(&self, theme: &str) -> usize {
        let handlers = self.theme_handlers.lock();
        for handler in handlers.iter() {
            handler(theme.to_string());
        }
        handlers.len()
    }

    /// Urls the host was asked to navigate to, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().clone()
    }

    fn ensure_initialized(&self) -> Result<(), HostError> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(HostError::NotInitialized)
        }
    }

    fn payload(&self) -> HostContextPayload {
        let user = self.settings.user_id.clone().map(|id| HostUserPayload {
            id,
            display_name: self.settings.user_display_name.clone(),
            user_principal_name: self.settings.user_email.clone(),
        });
        HostContextPayload {
            theme: self.settings.theme.clone(),
            user,
        }
    }
}

#[async_trait]
impl<L: Launcher> HostRepository for ConfiguredHost<L> {
    fn is_embedded(&self) -> bool {
        self.settings.embedded
    }

    async fn initialize(&self) -> Result<(), HostError> {
        if !self.settings.embedded {
            return Err(HostError::Unavailable("not running inside a host".into()));
        }
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    async fn context(&self) -> Result<HostContextPayload, HostError> {
        self.ensure_initialized()?;
        Ok(self.payload())
    }

    async fn on_theme_change(&self, handler: ThemeChangeHandler) -> Result<(), HostError> {
        self.ensure_initialized()?;
        self.theme_handlers.lock().push(handler);
        Ok(())
    }

    async fn navigate_to_tab(&self, url: &str) -> Result<(), HostError> {
        self.ensure_initialized()?;
        info!("Host navigating to {}", url);
        self.navigations.lock().push(url.to_string());
        Ok(())
    }

    fn open_external(&self, url: &str) {
        if let Err(e) = self.launcher.launch(url) {
            error!("Failed to open {}: {}", url, e);
        }
    }
}
