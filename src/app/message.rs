// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::{ChatEvent, Metrics, SourcesPage};
use crate::chat::RequestId;
use crate::error::Error;
use crate::sources::PageRequest;
use crate::ui::notifications;
use crate::ui::{chat_view, confirm_dialog, dashboard, navbar, sources_dropdown, toolbar};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Toolbar(toolbar::Message),
    Sources(sources_dropdown::Message),
    Chat(chat_view::Message),
    Dashboard(dashboard::Message),
    Confirm(confirm_dialog::Message),
    Notification(notifications::NotificationMessage),
    /// Progress of the streamed answer to request `id`.
    ChatProgress {
        id: RequestId,
        event: ChatEvent,
    },
    SourcesLoaded {
        request: PageRequest,
        result: Result<SourcesPage, Error>,
    },
    SourceDeleted {
        source: String,
        result: Result<String, Error>,
    },
    /// Result from the file picker; `None` when cancelled.
    FilePicked(Option<PathBuf>),
    Ingested(Result<String, Error>),
    StoreCleared(Result<String, Error>),
    MetricsLoaded {
        seq: u64,
        result: Result<Metrics, Error>,
    },
    /// Periodic dashboard refresh while the dialog is open.
    DashboardPoll,
    /// Startup reachability check.
    Pinged(Result<String, Error>),
    /// Periodic tick for toast expiry and the busy spinner.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `es`, `pt-BR`).
    pub lang: Option<String>,
    /// Backend base URL, overriding `[server] base_url`.
    pub server_url: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over `RAGCHAT_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `RAGCHAT_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
