//! Run settings: API credential, mailbox endpoint, cached working sets.

use serde::{Deserialize, Serialize};

mod loader;

pub use loader::{ensure_complete, load_settings, save_settings};

/// Default settings filename, next to the store and the generated script.
pub const SETTINGS_FILENAME: &str = "alias-sieve.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simplelogin: SimpleLoginSettings,
    pub mail: MailSettings,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleLoginSettings {
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Cached working folder set from the previous run.
    pub folders: Vec<String>,
    /// Cached working label set from the previous run.
    pub labels: Vec<String>,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 143,
            username: String::new(),
            password: String::new(),
            folders: Vec::new(),
            labels: Vec::new(),
        }
    }
}
