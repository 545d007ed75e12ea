// SPDX-License-Identifier: MPL-2.0
//! Configuration persistence logic.
//!
//! Saves the theme and language chosen from the navbar to `settings.toml`
//! and keeps the API client's `Accept-Language` in sync with the locale.

use crate::api::Client;
use crate::config;
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{Manager, Notification};
use crate::ui::theming::ThemeMode;
use unic_langid::LanguageIdentifier;

/// Persists the theme mode, reporting a failure as a warning toast.
pub fn persist_theme(theme_mode: ThemeMode, notifications: &mut Manager) {
    update_config(notifications, |cfg| cfg.general.theme_mode = theme_mode);
}

/// Applies the newly selected locale and persists it to config.
pub fn apply_language_change(
    i18n: &mut I18n,
    client: &mut Client,
    notifications: &mut Manager,
    locale: LanguageIdentifier,
) {
    i18n.set_locale(locale.clone());
    client.set_language(i18n.current_locale().to_string());
    update_config(notifications, |cfg| {
        cfg.general.language = Some(locale.to_string());
    });
}

/// Reloads the config file, applies `edit` and writes it back, so fields
/// edited by hand while the app runs are kept.
fn update_config(notifications: &mut Manager, edit: impl FnOnce(&mut config::Config)) {
    // Unit tests drive the update loop directly; keep them off the user's config.
    if cfg!(test) {
        return;
    }

    let (mut cfg, _) = config::load();
    edit(&mut cfg);

    if let Err(error) = config::save(&cfg) {
        tracing::warn!(%error, "failed to save config");
        notifications.push(Notification::warning("notification-config-save-error"));
    }
}
