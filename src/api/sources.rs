// SPDX-License-Identifier: MPL-2.0
//! Listing and deleting ingested sources.

use super::{error_from_response, text_or_error, Client};
use crate::error::Result;
use reqwest::Method;
use serde::Deserialize;

/// One page of source names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourcesPage {
    #[serde(default)]
    pub sources: Vec<String>,
    /// Number of sources matching the search, across all pages.
    #[serde(default)]
    pub total: u64,
}

impl Client {
    /// Fetches page `page` (0-based) of `size` sources whose name contains
    /// `search`.
    pub async fn fetch_sources(&self, page: usize, size: usize, search: &str) -> Result<SourcesPage> {
        let query = [
            ("page", page.to_string()),
            ("size", size.to_string()),
            ("search", search.to_string()),
        ];
        let response = self
            .send_with_retry(|| self.request(Method::GET, "/api/chat/sources").query(&query))
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let body = response.text().await?;
        let page: SourcesPage = serde_json::from_str(&body)?;
        tracing::debug!(count = page.sources.len(), total = page.total, "sources fetched");
        Ok(page)
    }

    /// Deletes every chunk ingested from `source`. Returns the backend's
    /// confirmation text.
    pub async fn delete_source(&self, source: &str) -> Result<String> {
        let response = self
            .send_with_retry(|| {
                self.request(Method::DELETE, "/api/chat/source")
                    .query(&[("source", source)])
            })
            .await?;
        text_or_error(response).await
    }
}
