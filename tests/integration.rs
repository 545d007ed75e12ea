// SPDX-License-Identifier: MPL-2.0
use ragchat::app::persisted_state::AppState;
use ragchat::config::{self, Config, DEFAULT_SOURCES_PAGE_SIZE};
use ragchat::i18n::fluent::I18n;
use ragchat::ui::theming::ThemeMode;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("send-button"), "Send");

    // 2. Change config to pt-BR
    let mut portuguese_config = Config::default();
    portuguese_config.general.language = Some("pt-BR".to_string());
    config::save_to_path(&portuguese_config, &temp_config_file_path)
        .expect("Failed to write portuguese config file");

    let loaded_portuguese_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load portuguese config from path");
    let i18n_pt = I18n::new(None, None, &loaded_portuguese_config);
    assert_eq!(i18n_pt.current_locale().to_string(), "pt-BR");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn cli_language_wins_over_config() {
    let mut config = Config::default();
    config.general.language = Some("pt-BR".to_string());

    let i18n = I18n::new(Some("es".to_string()), None, &config);
    assert_eq!(i18n.current_locale().to_string(), "es");
}

#[test]
fn hand_written_settings_are_clamped() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
[general]
theme_mode = "dark"

[server]
base_url = "http://rag.example:9000/"
max_retries = 99
initial_backoff_ms = 1

[sources]
page_size = 0

[dashboard]
refresh_interval_secs = 100000
"#,
    )
    .expect("write settings");

    let config = config::load_from_path(&path).expect("settings parse");
    assert_eq!(config.general.theme_mode, ThemeMode::Dark);
    assert_eq!(config.server.base_url(), "http://rag.example:9000");
    assert_eq!(config.server.max_retries(), config::MAX_MAX_RETRIES);
    assert_eq!(
        config.server.initial_backoff(),
        Duration::from_millis(config::MIN_INITIAL_BACKOFF_MS)
    );
    assert_eq!(config.sources.page_size(), config::MIN_SOURCES_PAGE_SIZE);
    assert_eq!(
        config.dashboard.refresh_interval(),
        Duration::from_secs(config::MAX_DASHBOARD_REFRESH_SECS)
    );
    // Untouched sections keep their defaults.
    assert_eq!(
        config.notifications.toast_timeout(),
        Duration::from_secs(config::DEFAULT_TOAST_TIMEOUT_SECS)
    );
}

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert!(warning.is_none());
    assert_eq!(config.sources.page_size(), DEFAULT_SOURCES_PAGE_SIZE);
    assert_eq!(config.server.base_url(), config::DEFAULT_SERVER_URL);
}

#[test]
fn invalid_settings_file_warns_and_falls_back() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[server\nbase_url = ")
        .expect("write settings");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    assert_eq!(config.server.base_url(), config::DEFAULT_SERVER_URL);
}

#[test]
fn app_state_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let mut state = AppState::default();
    state.set_last_open_directory_from_file(&PathBuf::from("/home/user/docs/manual.pdf"));
    assert!(state.save_to(Some(dir.path().to_path_buf())).is_none());

    let (loaded, warning) = AppState::load_from(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(
        loaded.last_open_directory,
        Some(PathBuf::from("/home/user/docs"))
    );
}
