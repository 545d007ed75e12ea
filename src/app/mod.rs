// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the chat, the sources
//! browser, ingestion and the dashboard.
//!
//! The `App` struct wires together the domains (conversation, request
//! activity, localization, settings) and translates messages into side
//! effects such as HTTP requests or config persistence. Network work runs as
//! `iced::Task`s; their results come back as messages tagged with what they
//! belong to, so late answers can be recognized and dropped.

mod message;
pub mod paths;
pub mod persisted_state;
mod persistence;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::api::Client;
use crate::chat::{Activity, Conversation};
use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::sources::SourceBrowser;
use crate::ui::confirm_dialog::Pending;
use crate::ui::dashboard;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use iced::{task, window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    client: Client,
    theme_mode: ThemeMode,
    conversation: Conversation,
    activity: Activity,
    /// Text typed in the message input.
    input: String,
    /// Abort handle of the chat stream in flight.
    chat_handle: Option<task::Handle>,
    /// Source the chat is restricted to; empty for all sources.
    filter: String,
    browser: SourceBrowser,
    /// Document picked for ingestion.
    selected_file: Option<PathBuf>,
    dashboard: dashboard::State,
    dashboard_refresh: Duration,
    /// Destructive action waiting for confirmation.
    pending_confirm: Option<Pending>,
    /// Persisted application state (last directory of the file picker).
    app_state: persisted_state::AppState,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    spinner_rotation: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("server", &self.client.base_url())
            .field("messages", &self.conversation.messages().len())
            .field("streaming", &self.activity.is_streaming())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1000;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 720;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(&Config::default(), I18n::default())
    }
}

impl App {
    /// Builds the state described by `config`, with nothing loaded yet.
    fn with_config(config: &Config, i18n: I18n) -> Self {
        let mut client = Client::new(&config.server);
        client.set_language(i18n.current_locale().to_string());

        Self {
            i18n,
            client,
            theme_mode: config.general.theme_mode,
            conversation: Conversation::new(),
            activity: Activity::new(),
            input: String::new(),
            chat_handle: None,
            filter: String::new(),
            browser: SourceBrowser::new(config.sources.page_size()),
            selected_file: None,
            dashboard: dashboard::State::new(),
            dashboard_refresh: config.dashboard.refresh_interval(),
            pending_confirm: None,
            app_state: persisted_state::AppState::default(),
            notifications: notifications::Manager::new(config.notifications.toast_timeout()),
            spinner_rotation: 0.0,
        }
    }

    /// Loads config and state, then checks that the backend is reachable.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (mut config, config_warning) = config::load();
        if let Some(url) = flags.server_url {
            config.server.base_url = url;
        }
        let i18n = I18n::new(flags.lang, flags.i18n_dir, &config);

        let mut app = Self::with_config(&config, i18n);
        tracing::info!(
            server = app.client.base_url(),
            locale = %app.i18n.current_locale(),
            "starting"
        );

        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        let (app_state, state_warning) = persisted_state::AppState::load();
        app.app_state = app_state;
        if let Some(key) = state_warning {
            app.notifications.push(Notification::warning(key));
        }

        let client = app.client.clone();
        let ping = Task::perform(async move { client.ping().await }, Message::Pinged);

        (app, ping)
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    /// Whether an upload, a reset or an answer is running.
    fn is_busy(&self) -> bool {
        self.activity.is_streaming() || self.activity.is_uploading() || self.activity.is_deleting()
    }

    fn subscription(&self) -> Subscription<Message> {
        let tick_sub = subscription::create_tick_subscription(
            self.notifications.has_notifications(),
            self.is_busy(),
        );
        let dashboard_sub = subscription::create_dashboard_subscription(
            self.dashboard.is_open(),
            self.dashboard_refresh,
        );

        Subscription::batch([tick_sub, dashboard_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &mut self.i18n,
            client: &mut self.client,
            theme_mode: &mut self.theme_mode,
            conversation: &mut self.conversation,
            activity: &mut self.activity,
            input: &mut self.input,
            chat_handle: &mut self.chat_handle,
            filter: &mut self.filter,
            browser: &mut self.browser,
            selected_file: &mut self.selected_file,
            dashboard: &mut self.dashboard,
            pending_confirm: &mut self.pending_confirm,
            app_state: &mut self.app_state,
            notifications: &mut self.notifications,
        };

        match message {
            Message::Navbar(navbar_message) => {
                update::handle_navbar_message(&mut ctx, navbar_message)
            }
            Message::Toolbar(toolbar_message) => {
                update::handle_toolbar_message(&mut ctx, toolbar_message)
            }
            Message::Sources(sources_message) => {
                update::handle_sources_message(&mut ctx, sources_message)
            }
            Message::Chat(chat_message) => update::handle_chat_message(&mut ctx, chat_message),
            Message::Dashboard(dashboard_message) => {
                update::handle_dashboard_message(&mut ctx, dashboard_message)
            }
            Message::Confirm(confirm_message) => {
                update::handle_confirm_message(&mut ctx, confirm_message)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::ChatProgress { id, event } => {
                update::handle_chat_progress(&mut ctx, id, event);
                Task::none()
            }
            Message::SourcesLoaded { request, result } => {
                update::handle_sources_loaded(&mut ctx, request, result)
            }
            Message::SourceDeleted { source, result } => {
                update::handle_source_deleted(&mut ctx, source, result)
            }
            Message::FilePicked(path) => {
                update::handle_file_picked(&mut ctx, path);
                Task::none()
            }
            Message::Ingested(result) => {
                update::handle_ingested(&mut ctx, result);
                Task::none()
            }
            Message::StoreCleared(result) => update::handle_store_cleared(&mut ctx, result),
            Message::MetricsLoaded { seq, result } => {
                if let Some(err) = self.dashboard.apply(seq, result) {
                    tracing::warn!(%err, "metrics fetch failed");
                    self.notifications
                        .push(Notification::error("notification-metrics-error"));
                }
                Task::none()
            }
            Message::DashboardPoll => match self.dashboard.poll() {
                Some(seq) => update::fetch_metrics(&self.client, seq),
                None => Task::none(),
            },
            Message::Pinged(result) => {
                if let Err(err) = result {
                    tracing::warn!(%err, "backend unreachable");
                    self.notifications.push(
                        Notification::warning("notification-backend-unreachable")
                            .with_arg("url", self.client.base_url()),
                    );
                }
                Task::none()
            }
            Message::Tick(_instant) => {
                self.notifications.tick();
                if self.is_busy() {
                    self.spinner_rotation =
                        crate::ui::widgets::animated_spinner::advance(self.spinner_rotation);
                }
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            is_dark: self.theme_mode.is_dark(),
            conversation: &self.conversation,
            activity: &self.activity,
            input: &self.input,
            filter: &self.filter,
            browser: &self.browser,
            selected_file: self.selected_file.as_deref(),
            dashboard: &self.dashboard,
            pending_confirm: self.pending_confirm.as_ref(),
            notifications: &self.notifications,
            spinner_rotation: self.spinner_rotation,
        })
    }
}
