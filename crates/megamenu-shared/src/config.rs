//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_STORAGE_FILE, MENU_STORAGE_KEY};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub host: HostSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// File backing the key-value store.
    pub path: String,
    pub key: String,
    /// Byte limit for all stored keys and values; unlimited when absent.
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

/// Host context handed to the app when it is not running inside a real host.
#[derive(Debug, Deserialize, Clone)]
pub struct HostSettings {
    pub embedded: bool,
    pub theme: Option<String>,
    pub user_id: Option<String>,
    pub user_display_name: Option<String>,
    pub user_email: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "megamenu")?
            .set_default("storage.path", DEFAULT_STORAGE_FILE)?
            .set_default("storage.key", MENU_STORAGE_KEY)?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            .set_default("logging.json", false)?
            .set_default("host.embedded", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("MEGAMENU")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}
