// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Handlers mutate the borrowed state in [`UpdateContext`] and return the
//! `Task` carrying the network work they started. Failures come back as
//! messages and are reported as toasts.

use super::{persistence, persisted_state::AppState, Message};
use crate::api::{ChatEvent, ChatRequest, Client, Document, SourcesPage};
use crate::chat::{self, Activity, Conversation, Outcome, RequestId};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::sources::{Applied, PageRequest, SourceBrowser};
use crate::ui::chat_view;
use crate::ui::confirm_dialog::{self, Pending};
use crate::ui::dashboard;
use crate::ui::navbar;
use crate::ui::notifications::{Manager, Notification};
use crate::ui::sources_dropdown::{self, Event as SourcesEvent};
use crate::ui::theming::ThemeMode;
use crate::ui::toolbar;
use iced::{task, Task};
use std::path::PathBuf;

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub client: &'a mut Client,
    pub theme_mode: &'a mut ThemeMode,
    pub conversation: &'a mut Conversation,
    pub activity: &'a mut Activity,
    pub input: &'a mut String,
    pub chat_handle: &'a mut Option<task::Handle>,
    pub filter: &'a mut String,
    pub browser: &'a mut SourceBrowser,
    pub selected_file: &'a mut Option<PathBuf>,
    pub dashboard: &'a mut dashboard::State,
    pub pending_confirm: &'a mut Option<Pending>,
    pub app_state: &'a mut AppState,
    pub notifications: &'a mut Manager,
}

// =============================================================================
// Component messages
// =============================================================================

pub fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: navbar::Message) -> Task<Message> {
    match message {
        navbar::Message::OpenDashboard => {
            let seq = ctx.dashboard.open();
            fetch_metrics(ctx.client, seq)
        }
        navbar::Message::ToggleTheme => {
            *ctx.theme_mode = ctx.theme_mode.toggled();
            persistence::persist_theme(*ctx.theme_mode, ctx.notifications);
            Task::none()
        }
        navbar::Message::LanguageSelected(locale) => {
            persistence::apply_language_change(ctx.i18n, ctx.client, ctx.notifications, locale);
            Task::none()
        }
    }
}

pub fn handle_toolbar_message(
    ctx: &mut UpdateContext<'_>,
    message: toolbar::Message,
) -> Task<Message> {
    match message {
        toolbar::Message::FilterChanged(value) => {
            *ctx.filter = value;
            Task::none()
        }
        toolbar::Message::ClearFilter => {
            ctx.filter.clear();
            Task::none()
        }
        toolbar::Message::ToggleSources => match ctx.browser.toggle() {
            Some(request) => fetch_sources(ctx.client, request),
            None => Task::none(),
        },
        toolbar::Message::PickFile => {
            if ctx.activity.is_uploading() {
                return Task::none();
            }
            pick_file(ctx.app_state.last_open_directory.clone())
        }
        toolbar::Message::Ingest => start_ingest(ctx),
        toolbar::Message::ClearStore => {
            if ctx.activity.can_clear_store() {
                *ctx.pending_confirm = Some(Pending::ClearStore);
            }
            Task::none()
        }
    }
}

pub fn handle_sources_message(
    ctx: &mut UpdateContext<'_>,
    message: sources_dropdown::Message,
) -> Task<Message> {
    match sources_dropdown::update(message, ctx.browser) {
        SourcesEvent::None => Task::none(),
        SourcesEvent::Fetch(request) => fetch_sources(ctx.client, request),
        SourcesEvent::Select(source) => {
            *ctx.filter = source;
            Task::none()
        }
        SourcesEvent::ConfirmDelete(source) => {
            *ctx.pending_confirm = Some(Pending::DeleteSource(source));
            Task::none()
        }
    }
}

pub fn handle_chat_message(ctx: &mut UpdateContext<'_>, message: chat_view::Message) -> Task<Message> {
    match message {
        chat_view::Message::InputChanged(value) => {
            *ctx.input = value;
            Task::none()
        }
        chat_view::Message::Submit => start_chat(ctx),
        chat_view::Message::Stop => {
            if let Some(id) = chat::stop(ctx.conversation, ctx.activity) {
                if let Some(handle) = ctx.chat_handle.take() {
                    handle.abort();
                }
                tracing::info!(?id, "chat stopped");
            }
            Task::none()
        }
    }
}

pub fn handle_dashboard_message(
    ctx: &mut UpdateContext<'_>,
    message: dashboard::Message,
) -> Task<Message> {
    match ctx.dashboard.update(message) {
        dashboard::Event::Fetch(seq) => fetch_metrics(ctx.client, seq),
        dashboard::Event::None => Task::none(),
    }
}

pub fn handle_confirm_message(
    ctx: &mut UpdateContext<'_>,
    message: confirm_dialog::Message,
) -> Task<Message> {
    let Some(pending) = ctx.pending_confirm.take() else {
        return Task::none();
    };
    if matches!(message, confirm_dialog::Message::Cancel) {
        return Task::none();
    }

    match pending {
        Pending::ClearStore => {
            if !ctx.activity.begin_delete() {
                return Task::none();
            }
            let client = ctx.client.clone();
            Task::perform(
                async move { client.delete_vector_store().await },
                Message::StoreCleared,
            )
        }
        Pending::DeleteSource(source) => {
            tracing::info!(%source, "deleting source");
            let client = ctx.client.clone();
            let name = source.clone();
            Task::perform(
                async move { client.delete_source(&name).await },
                move |result| Message::SourceDeleted {
                    source: source.clone(),
                    result,
                },
            )
        }
    }
}

// =============================================================================
// Chat
// =============================================================================

fn start_chat(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let text = ctx.input.clone();
    let Some(id) = chat::start(ctx.conversation, ctx.activity, &text) else {
        return Task::none();
    };
    ctx.input.clear();

    let request = ChatRequest {
        message: text,
        source: ctx.filter.clone(),
    };
    let (task, handle) = Task::stream(ctx.client.stream_chat(request))
        .map(move |event| Message::ChatProgress { id, event })
        .abortable();
    *ctx.chat_handle = Some(handle);
    task
}

pub fn handle_chat_progress(ctx: &mut UpdateContext<'_>, id: RequestId, event: ChatEvent) {
    match chat::apply(ctx.conversation, ctx.activity, id, event) {
        Outcome::Streaming | Outcome::Stale => {}
        Outcome::Finished => {
            *ctx.chat_handle = None;
        }
        Outcome::Failed(err) => {
            *ctx.chat_handle = None;
            ctx.notifications.push(chat_error(&err));
        }
    }
}

fn chat_error(err: &Error) -> Notification {
    match err {
        Error::Api {
            message: Some(message),
            ..
        } => server_message_error(message),
        Error::Api { message: None, .. } => Notification::error("error-network"),
        other => Notification::error("error-chat-failed").with_arg("detail", other.to_string()),
    }
}

// =============================================================================
// Sources
// =============================================================================

fn fetch_sources(client: &Client, request: PageRequest) -> Task<Message> {
    let client = client.clone();
    let query = request.clone();
    Task::perform(
        async move {
            client
                .fetch_sources(query.page, query.size, &query.search)
                .await
        },
        move |result| Message::SourcesLoaded {
            request: request.clone(),
            result,
        },
    )
}

pub fn handle_sources_loaded(
    ctx: &mut UpdateContext<'_>,
    request: PageRequest,
    result: Result<SourcesPage, Error>,
) -> Task<Message> {
    match result {
        Ok(page) => match ctx.browser.apply(&request, page) {
            Applied::Refetch(next) => fetch_sources(ctx.client, next),
            Applied::Updated | Applied::Stale => Task::none(),
        },
        Err(err) => {
            if ctx.browser.is_current(&request) {
                tracing::warn!(%err, "sources fetch failed");
                let key = if matches!(err, Error::Api { .. }) {
                    "error-fetch-sources"
                } else {
                    "error-fetch-sources-generic"
                };
                ctx.notifications.push(Notification::error(key));
            }
            Task::none()
        }
    }
}

pub fn handle_source_deleted(
    ctx: &mut UpdateContext<'_>,
    source: String,
    result: Result<String, Error>,
) -> Task<Message> {
    match result {
        Ok(text) => {
            ctx.notifications.push(server_message(Notification::success, &text));
            if *ctx.filter == source {
                ctx.filter.clear();
            }
            fetch_sources(ctx.client, ctx.browser.refresh())
        }
        Err(err) => {
            tracing::warn!(%err, %source, "source deletion failed");
            let key = if matches!(err, Error::Api { .. }) {
                "error-delete-source"
            } else {
                "error-delete-source-generic"
            };
            ctx.notifications.push(Notification::error(key));
            Task::none()
        }
    }
}

// =============================================================================
// Ingestion
// =============================================================================

fn pick_file(last_directory: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new();

            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        },
        Message::FilePicked,
    )
}

pub fn handle_file_picked(ctx: &mut UpdateContext<'_>, path: Option<PathBuf>) {
    let Some(path) = path else {
        // User cancelled the dialog
        return;
    };

    ctx.app_state.set_last_open_directory_from_file(&path);
    if let Some(key) = ctx.app_state.save() {
        ctx.notifications.push(Notification::warning(key));
    }
    *ctx.selected_file = Some(path);
}

fn start_ingest(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(path) = ctx.selected_file.clone() else {
        return Task::none();
    };
    if !ctx.activity.begin_upload() {
        return Task::none();
    }

    let client = ctx.client.clone();
    Task::perform(
        async move {
            let document = Document::read(&path).await?;
            client.ingest(&document).await
        },
        Message::Ingested,
    )
}

pub fn handle_ingested(ctx: &mut UpdateContext<'_>, result: Result<String, Error>) {
    ctx.activity.finish_upload();
    match result {
        Ok(text) => {
            ctx.notifications.push(server_message(Notification::success, &text));
            *ctx.selected_file = None;
        }
        Err(err) => {
            tracing::warn!(%err, "ingestion failed");
            ctx.notifications.push(upload_error(&err));
        }
    }
}

fn upload_error(err: &Error) -> Notification {
    match err {
        Error::Api {
            message: Some(message),
            ..
        } => server_message_error(message),
        Error::Api { message: None, .. } => Notification::error("error-upload-failed"),
        Error::Io(_) => Notification::error("notification-file-read-error"),
        _ => Notification::error("error-upload-generic"),
    }
}

pub fn handle_store_cleared(
    ctx: &mut UpdateContext<'_>,
    result: Result<String, Error>,
) -> Task<Message> {
    ctx.activity.finish_delete();
    match result {
        Ok(text) => {
            ctx.notifications.push(server_message(Notification::success, &text));
            if ctx.browser.is_open() {
                return fetch_sources(ctx.client, ctx.browser.refresh());
            }
        }
        Err(err) => {
            tracing::warn!(%err, "vector store deletion failed");
            let notification = match err.server_message() {
                Some(message) => server_message_error(message),
                None => Notification::error("error-delete-vector"),
            };
            ctx.notifications.push(notification);
        }
    }
    Task::none()
}

// =============================================================================
// Dashboard
// =============================================================================

pub fn fetch_metrics(client: &Client, seq: u64) -> Task<Message> {
    let client = client.clone();
    Task::perform(
        async move { client.fetch_metrics().await },
        move |result| Message::MetricsLoaded { seq, result },
    )
}

// =============================================================================
// Helpers
// =============================================================================

/// Toast showing text supplied by the backend.
fn server_message(build: fn(&'static str) -> Notification, text: &str) -> Notification {
    build("notification-server-message").with_arg("message", text)
}

fn server_message_error(text: &str) -> Notification {
    server_message(Notification::error, text)
}
