//! Settings file loading, saving, and interactive backfill.

use super::Settings;
use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use std::fs;
use std::path::Path;

/// Read the settings file. Missing file means defaults; malformed content is
/// reported and replaced with defaults so the run can continue.
pub fn load_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Settings::default(),
    };

    match toml::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(
                "Malformed settings file {}: {err}; continuing with defaults",
                path.display()
            );
            Settings::default()
        }
    }
}

/// Rewrite the settings file, temp-file-then-rename.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(settings)
        .context("Failed serializing settings")?;

    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, content)
        .with_context(|| format!("Failed writing settings: {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed replacing settings: {}", path.display()))?;
    Ok(())
}

/// Prompt for any credential the settings file is missing. Returns whether
/// anything changed so the caller knows to persist the file.
pub fn ensure_complete(settings: &mut Settings) -> Result<bool> {
    let theme = ColorfulTheme::default();
    let mut changed = false;

    if settings.simplelogin.api_key.is_empty() {
        settings.simplelogin.api_key =
            Password::with_theme(&theme).with_prompt("SimpleLogin API key").interact()?;
        changed = true;
    }

    if settings.mail.host.is_empty() {
        settings.mail.host =
            Input::with_theme(&theme).with_prompt("IMAP host").interact_text()?;
        changed = true;
    }

    if settings.mail.port == 0 {
        settings.mail.port = Input::with_theme(&theme)
            .with_prompt("IMAP port")
            .default(143)
            .interact_text()?;
        changed = true;
    }

    if settings.mail.username.is_empty() {
        settings.mail.username =
            Input::with_theme(&theme).with_prompt("IMAP username").interact_text()?;
        changed = true;
    }

    if settings.mail.password.is_empty() {
        settings.mail.password =
            Password::with_theme(&theme).with_prompt("IMAP password").interact()?;
        changed = true;
    }

    Ok(changed)
}
