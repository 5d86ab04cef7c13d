//! Opening urls outside the host.

use std::io;

use tracing::debug;

/// Something that can show a url to the user.
pub trait Launcher: Send + Sync {
    fn launch(&self, url: &str) -> io::Result<()>;
}

/// The platform's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Launcher for SystemBrowser {
    fn launch(&self, url: &str) -> io::Result<()> {
        debug!("Launching system browser for {}", url);
        open::that(url)
    }
}
