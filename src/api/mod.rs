// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the chat backend.
//!
//! All calls go through [`Client`], which carries the base URL, the retry
//! policy and the UI language. The backend localizes its confirmation and
//! error texts from the `Accept-Language` header, so the client sends the
//! current locale with every request.
//!
//! # Endpoints
//!
//! | Call | Method | Path |
//! |------|--------|------|
//! | [`Client::stream_chat`] | POST | `/api/chat/stream` |
//! | [`Client::ingest`] | POST | `/api/chat/ingest` |
//! | [`Client::delete_vector_store`] | DELETE | `/api/chat/vectorstore` |
//! | [`Client::fetch_sources`] | GET | `/api/chat/sources` |
//! | [`Client::delete_source`] | DELETE | `/api/chat/source` |
//! | [`Client::ping`] | GET | `/api/chat/ping` |
//! | [`Client::fetch_metrics`] | GET | `/actuator/...` |

pub mod chat;
pub mod health;
pub mod ingest;
pub mod retry;
pub mod sources;
pub mod stream;

pub use chat::{ChatEvent, ChatRequest};
pub use health::{format_bytes, format_uptime, Metrics};
pub use ingest::Document;
pub use retry::RetryPolicy;
pub use sources::SourcesPage;
pub use stream::Utf8Accumulator;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::{Method, RequestBuilder, Response};

const USER_AGENT: &str = concat!("RagChat/", env!("CARGO_PKG_VERSION"));

/// Handle to the chat backend. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    language: String,
}

impl Client {
    /// Builds a client from the `[server]` settings.
    #[must_use]
    pub fn new(server: &ServerConfig) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(server.connect_timeout())
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "cannot configure HTTP client, using defaults");
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: server.base_url().to_string(),
            retry: RetryPolicy::from_config(server),
            language: String::new(),
        }
    }

    /// Builds a client with default transport settings.
    #[must_use]
    pub fn with_policy(base_url: impl Into<String>, retry: RetryPolicy) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
            language: String::new(),
        }
    }

    /// Sets the language sent as `Accept-Language`. Empty disables the header.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        if self.language.is_empty() {
            builder
        } else {
            builder.header(ACCEPT_LANGUAGE, &self.language)
        }
    }

    /// Sends the request built by `build`, retrying transport failures and
    /// 5xx answers. Any other answer is returned as is.
    async fn send_with_retry<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        retry::with_backoff(&self.retry, || {
            let request = build();
            async move {
                let response = request.send().await?;
                tracing::debug!(status = %response.status(), url = %response.url(), "response received");
                retry::reject_server_error(response)
            }
        })
        .await
    }
}

/// Turns a non-success answer into an [`Error::Api`], keeping the backend's
/// `{"error": ...}` message when there is one.
pub(crate) async fn error_from_response(response: Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Error::from_response_body(status, &body)
}

/// Reads the plain-text confirmation of a successful call.
pub(crate) async fn text_or_error(response: Response) -> Result<String> {
    if response.status().is_success() {
        Ok(response.text().await?)
    } else {
        Err(error_from_response(response).await)
    }
}
