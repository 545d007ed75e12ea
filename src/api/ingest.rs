// SPDX-License-Identifier: MPL-2.0
//! Document ingestion and vector store reset.

use super::{text_or_error, Client};
use crate::error::Result;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::path::Path;

/// A file read into memory, ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Reads `path` without blocking the runtime.
    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Ok(Self { file_name, bytes })
    }
}

impl Client {
    /// Uploads `document` as the multipart field `file`. Returns the
    /// backend's confirmation text.
    pub async fn ingest(&self, document: &Document) -> Result<String> {
        tracing::info!(file = %document.file_name, size = document.bytes.len(), "uploading document");
        let response = self
            .send_with_retry(|| {
                // A multipart body is consumed by each attempt.
                let part = Part::bytes(document.bytes.clone()).file_name(document.file_name.clone());
                self.request(Method::POST, "/api/chat/ingest")
                    .multipart(Form::new().part("file", part))
            })
            .await?;
        text_or_error(response).await
    }

    /// Deletes every embedding from the vector store.
    pub async fn delete_vector_store(&self) -> Result<String> {
        tracing::info!("deleting vector store");
        let response = self
            .send_with_retry(|| self.request(Method::DELETE, "/api/chat/vectorstore"))
            .await?;
        text_or_error(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::{test_client, Reply, TestServer};
    use tempfile::tempdir;

    fn document() -> Document {
        Document {
            file_name: "notes.txt".into(),
            bytes: b"retrieval augmented".to_vec(),
        }
    }

    #[tokio::test]
    async fn document_read_keeps_file_name_and_bytes() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("manual.md");
        std::fs::write(&path, "# Manual").expect("write");

        let doc = Document::read(&path).await.expect("read");
        assert_eq!(doc.file_name, "manual.md");
        assert_eq!(doc.bytes, b"# Manual");
    }

    #[tokio::test]
    async fn reading_a_missing_file_is_an_io_error() {
        let dir = tempdir().expect("temp dir");
        let result = Document::read(&dir.path().join("absent.pdf")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn ingest_posts_multipart_file_field() {
        let server =
            TestServer::start(|_| Reply::text(200, "File ingested successfully: notes.txt")).await;
        let client = test_client(&server);

        let text = client.ingest(&document()).await.expect("ingest");
        assert_eq!(text, "File ingested successfully: notes.txt");

        let requests = server.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path(), "/api/chat/ingest");
        assert!(requests[0]
            .header("content-type")
            .is_some_and(|value| value.starts_with("multipart/form-data")));
        let body = requests[0].body_text();
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"notes.txt\""));
        assert!(body.contains("retrieval augmented"));
    }

    #[tokio::test]
    async fn ingest_retry_resends_the_whole_file() {
        let server = TestServer::sequence(vec![
            Reply::text(500, "oops"),
            Reply::text(200, "ok"),
        ])
        .await;
        let client = test_client(&server);

        client.ingest(&document()).await.expect("ingest");
        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].body_text().contains("retrieval augmented"));
    }

    #[tokio::test]
    async fn ingest_rejection_carries_server_message() {
        let server = TestServer::start(|_| {
            Reply::json(413, serde_json::json!({ "error": "File too large" }))
        })
        .await;
        let client = test_client(&server);

        let err = client.ingest(&document()).await.expect_err("rejected");
        assert_eq!(err.server_message(), Some("File too large"));
    }

    #[tokio::test]
    async fn delete_vector_store_uses_delete_method() {
        let server = TestServer::start(|_| Reply::text(200, "Vector store deleted")).await;
        let client = test_client(&server);

        let text = client.delete_vector_store().await.expect("delete");
        assert_eq!(text, "Vector store deleted");
        let requests = server.requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path(), "/api/chat/vectorstore");
    }
}
