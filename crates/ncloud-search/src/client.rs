//! Meilisearch HTTP client implementing the [`SearchIndex`] seam.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use ncloud_core::config::search::SearchConfig;
use ncloud_core::error::AppError;
use ncloud_core::result::AppResult;
use ncloud_core::traits::search::{SearchDocument, SearchIndex};

/// Client for the Meilisearch document API.
///
/// Only the three write operations the mutation coordinator needs are
/// exposed; querying is a separate, read-side concern.
#[derive(Debug, Clone)]
pub struct MeilisearchIndex {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MeilisearchIndex {
    /// Create a new client from search configuration.
    pub fn new(config: &SearchConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::external_service(format!("Failed to build search client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }
        builder
    }

    async fn check(response: reqwest::Response, action: &str) -> AppResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::external_service(format!(
            "Search index {action} failed with {status}: {body}"
        )))
    }
}

#[async_trait]
impl SearchIndex for MeilisearchIndex {
    async fn upsert(&self, index: &str, documents: Vec<SearchDocument>) -> AppResult<()> {
        if documents.is_empty() {
            return Ok(());
        }
        debug!(index, count = documents.len(), "Upserting search documents");

        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/indexes/{index}/documents?primaryKey=_id"),
            )
            .json(&documents)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Search index unreachable: {e}")))?;

        Self::check(response, "upsert").await
    }

    async fn delete(&self, index: &str, ids: Vec<Uuid>) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        debug!(index, count = ids.len(), "Deleting search documents");

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/indexes/{index}/documents/delete-batch"),
            )
            .json(&ids)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Search index unreachable: {e}")))?;

        Self::check(response, "delete").await
    }

    async fn delete_by_filter(&self, index: &str, filter: &str) -> AppResult<()> {
        debug!(index, filter, "Deleting search documents by filter");

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/indexes/{index}/documents/delete"),
            )
            .json(&json!({ "filter": filter }))
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Search index unreachable: {e}")))?;

        Self::check(response, "delete-by-filter").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wire_shape() {
        let doc = SearchDocument {
            id: Uuid::from_u128(7),
            name: Some("report.pdf".into()),
            parent_directory: Some(Uuid::from_u128(3)),
            user: None,
            kind: Some("application/pdf".into()),
        };
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["_id"], Uuid::from_u128(7).to_string());
        assert_eq!(value["type"], "application/pdf");
        // Unset fields stay off the wire so partial updates merge.
        assert!(value.get("user").is_none());
    }
}
