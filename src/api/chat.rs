// SPDX-License-Identifier: MPL-2.0
//! Streaming chat.
//!
//! The backend answers `POST /api/chat/stream` with the assistant reply as a
//! raw text body, written piece by piece while the model generates it.
//! [`Client::stream_chat`] turns that body into a stream of [`ChatEvent`]s.

use super::{error_from_response, Client, Utf8Accumulator};
use crate::error::{Error, Result};
use futures_util::stream::{self, Stream};
use reqwest::{Method, Response};
use serde::Serialize;

/// Body of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Restricts retrieval to one source. Empty searches all sources.
    pub source: String,
}

/// Progress of a streamed answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Newly decoded text to append to the answer.
    Delta(String),
    /// The body ended normally.
    Finished,
    /// The request or the body failed. No event follows.
    Failed(Error),
}

enum Phase {
    Connecting { client: Client, request: ChatRequest },
    Reading { response: Response, decoder: Utf8Accumulator },
    Flushed,
    Done,
}

impl Client {
    /// Sends the chat request and returns the response once its status is
    /// known to be a success.
    pub async fn open_chat(&self, request: &ChatRequest) -> Result<Response> {
        let response = self
            .send_with_retry(|| self.request(Method::POST, "/api/chat/stream").json(request))
            .await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Streams the answer to `request`.
    ///
    /// Always ends with exactly one [`ChatEvent::Finished`] or
    /// [`ChatEvent::Failed`]. Dropping the stream cancels the request.
    pub fn stream_chat(&self, request: ChatRequest) -> impl Stream<Item = ChatEvent> + Send + 'static {
        let start = Phase::Connecting {
            client: self.clone(),
            request,
        };

        stream::unfold(start, |phase| async move {
            match phase {
                Phase::Connecting { client, request } => {
                    tracing::info!(source = %request.source, "chat request sent");
                    match client.open_chat(&request).await {
                        Ok(response) => read_next(response, Utf8Accumulator::new()).await,
                        Err(err) => {
                            tracing::warn!(%err, "chat request failed");
                            Some((ChatEvent::Failed(err), Phase::Done))
                        }
                    }
                }
                Phase::Reading { response, decoder } => read_next(response, decoder).await,
                Phase::Flushed => Some((ChatEvent::Finished, Phase::Done)),
                Phase::Done => None,
            }
        })
    }
}

/// Reads chunks until one completes some text, the body ends, or it fails.
async fn read_next(
    mut response: Response,
    mut decoder: Utf8Accumulator,
) -> Option<(ChatEvent, Phase)> {
    loop {
        match response.chunk().await {
            Ok(Some(bytes)) => {
                let delta = decoder.push(&bytes);
                if !delta.is_empty() {
                    let delta = delta.to_owned();
                    return Some((
                        ChatEvent::Delta(delta),
                        Phase::Reading { response, decoder },
                    ));
                }
            }
            Ok(None) => {
                let tail = decoder.finish().to_owned();
                tracing::info!(chars = decoder.text().chars().count(), "chat answer complete");
                return if tail.is_empty() {
                    Some((ChatEvent::Finished, Phase::Done))
                } else {
                    Some((ChatEvent::Delta(tail), Phase::Flushed))
                };
            }
            Err(err) => {
                tracing::warn!(%err, "chat stream interrupted");
                return Some((ChatEvent::Failed(err.into()), Phase::Done));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_client, Reply, TestServer};
    use futures_util::StreamExt;

    fn request(message: &str, source: &str) -> ChatRequest {
        ChatRequest {
            message: message.into(),
            source: source.into(),
        }
    }

    #[test]
    fn request_serializes_to_backend_shape() {
        let json = serde_json::to_value(request("hi", "manual.pdf")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "hi", "source": "manual.pdf" })
        );
    }

    #[tokio::test]
    async fn streamed_chunks_become_deltas() {
        let server = TestServer::start(|_| {
            Reply::chunked(
                200,
                vec![b"Hello".to_vec(), b", ".to_vec(), b"world".to_vec()],
            )
        })
        .await;
        let client = test_client(&server);

        let events: Vec<ChatEvent> = client.stream_chat(request("hi", "")).collect().await;

        let text: String = events
            .iter()
            .filter_map(|event| match event {
                ChatEvent::Delta(delta) => Some(delta.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "Hello, world");
        assert_eq!(events.last(), Some(&ChatEvent::Finished));

        let requests = server.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path(), "/api/chat/stream");
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "hi", "source": "" }));
    }

    #[tokio::test]
    async fn multibyte_characters_split_between_chunks_survive() {
        let bytes = "Olá 👋".as_bytes().to_vec();
        let server = TestServer::start(move |_| {
            Reply::chunked(200, vec![bytes[..3].to_vec(), bytes[3..6].to_vec(), bytes[6..].to_vec()])
        })
        .await;
        let client = test_client(&server);

        let events: Vec<ChatEvent> = client.stream_chat(request("hi", "")).collect().await;
        let text: String = events
            .iter()
            .filter_map(|event| match event {
                ChatEvent::Delta(delta) => Some(delta.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "Olá 👋");
        assert!(events.iter().all(|event| event != &ChatEvent::Delta(String::new())));
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let server = TestServer::start(|_| {
            Reply::json(400, serde_json::json!({ "error": "Message must not be empty" }))
        })
        .await;
        let client = test_client(&server);

        let events: Vec<ChatEvent> = client.stream_chat(request(" ", "")).collect().await;
        assert_eq!(
            events,
            vec![ChatEvent::Failed(Error::Api {
                status: 400,
                message: Some("Message must not be empty".into())
            })]
        );
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn error_without_json_has_no_message() {
        let server = TestServer::start(|_| Reply::text(404, "not here")).await;
        let client = test_client(&server);

        let events: Vec<ChatEvent> = client.stream_chat(request("hi", "")).collect().await;
        assert_eq!(
            events,
            vec![ChatEvent::Failed(Error::Api {
                status: 404,
                message: None
            })]
        );
    }

    #[tokio::test]
    async fn server_errors_are_retried_before_streaming() {
        let server = TestServer::sequence(vec![
            Reply::text(502, "bad gateway"),
            Reply::chunked(200, vec![b"ok".to_vec(), b"!".to_vec()]),
        ])
        .await;
        let client = test_client(&server);

        let events: Vec<ChatEvent> = client.stream_chat(request("hi", "")).collect().await;
        assert_eq!(
            events,
            vec![
                ChatEvent::Delta("ok".into()),
                ChatEvent::Delta("!".into()),
                ChatEvent::Finished
            ]
        );
        assert_eq!(server.requests().len(), 2);
    }
}
