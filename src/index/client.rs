// src/index/client.rs

//! Elasticsearch-compatible REST backend for [`SearchIndex`].
//!
//! Talks plain HTTP: HEAD/DELETE/PUT for index lifecycle and the NDJSON
//! `_bulk` endpoint for batch writes.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::config::SearchConfig;
use crate::error::{AppError, Result};
use crate::models::AyahDocument;

use super::{SearchIndex, schema};

/// REST client for an Elasticsearch-compatible cluster.
pub struct ElasticsearchIndex {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl ElasticsearchIndex {
    /// Create a new backend from search configuration.
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.client.request(method, url);
        if self.username.is_empty() {
            builder
        } else {
            builder.basic_auth(&self.username, Some(&self.password))
        }
    }

    /// Render one batch as NDJSON: an action line naming the `_id`
    /// followed by the document source, per document.
    fn bulk_body(documents: &[AyahDocument]) -> Result<String> {
        let mut body = String::new();
        for doc in documents {
            let action = serde_json::json!({ "index": { "_id": doc.id } });
            body.push_str(&serde_json::to_string(&action)?);
            body.push('\n');
            body.push_str(&serde_json::to_string(doc)?);
            body.push('\n');
        }
        Ok(body)
    }
}

/// Extract the ids of individually rejected documents from a `_bulk`
/// response body.
///
/// The response carries one item per action; an item with an `error`
/// object was rejected while its neighbors were still committed.
pub fn failed_ids_from_bulk_response(response: &Value) -> Vec<String> {
    if response["errors"] != Value::Bool(true) {
        return Vec::new();
    }

    let Some(items) = response["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_object()?.values().next())
        .filter(|result| result.get("error").is_some())
        .filter_map(|result| result["_id"].as_str().map(String::from))
        .collect()
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    async fn exists(&self, index: &str) -> Result<bool> {
        let response = self.request(Method::HEAD, index).send().await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(AppError::search(
                format!("exists {index}"),
                format!("HTTP {status}"),
            )),
        }
    }

    async fn delete(&self, index: &str) -> Result<()> {
        let response = self.request(Method::DELETE, index).send().await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(AppError::search(
                format!("delete {index}"),
                format!("HTTP {status}"),
            ))
        }
    }

    async fn create(&self, index: &str) -> Result<()> {
        let response = self
            .request(Method::PUT, index)
            .json(&schema::ayah_mappings())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::search(
                format!("create {index}"),
                format!("HTTP {status}: {body}"),
            ))
        }
    }

    async fn bulk_write(&self, index: &str, documents: &[AyahDocument]) -> Result<Vec<String>> {
        let body = Self::bulk_body(documents)?;
        let response = self
            .request(Method::POST, &format!("{index}/_bulk"))
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::search(
                format!("bulk {index}"),
                format!("HTTP {status}: {body}"),
            ));
        }

        let payload: Value = response.json().await?;
        Ok(failed_ids_from_bulk_response(&payload))
    }
}
