//! Host SDK port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::HostContextPayload;
use crate::error::HostError;

/// Callback receiving raw host theme names.
pub type ThemeChangeHandler = Box<dyn Fn(String) + Send + Sync>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait HostRepository: Send + Sync {
    /// Whether the app is framed inside the host application.
    fn is_embedded(&self) -> bool;
    async fn initialize(&self) -> Result<(), HostError>;
    async fn context(&self) -> Result<HostContextPayload, HostError>;
    async fn on_theme_change(&self, handler: ThemeChangeHandler) -> Result<(), HostError>;
    async fn navigate_to_tab(&self, url: &str) -> Result<(), HostError>;
    /// Opens the url outside the host, e.g. in a new browser window.
    fn open_external(&self, url: &str);
}
