// src/services/catalog.rs

//! Edition catalog service.
//!
//! Fetches the list of available editions from the remote API. Fails open:
//! any transport error or non-success status yields an empty list, logged
//! here; the orchestrator decides whether an empty catalog aborts the run.

use reqwest::Client;
use serde::Deserialize;

use crate::models::Edition;

/// Envelope the catalog endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    data: Vec<Edition>,
}

/// Service for listing available editions.
pub struct EditionCatalog {
    client: Client,
    editions_url: String,
}

impl EditionCatalog {
    /// Create a new catalog source for the given editions URL.
    pub fn new(client: Client, editions_url: impl Into<String>) -> Self {
        Self {
            client,
            editions_url: editions_url.into(),
        }
    }

    /// Fetch the list of available editions.
    ///
    /// Returns an empty list when the catalog cannot be reached or returns
    /// a non-success status; the condition is logged, not raised.
    pub async fn list_editions(&self) -> Vec<Edition> {
        let response = match self.client.get(&self.editions_url).send().await {
            Ok(response) => response,
            Err(error) => {
                log::error!("Failed to fetch the edition catalog: {}", error);
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::error!(
                "Edition catalog returned {} for {}",
                status,
                self.editions_url
            );
            return Vec::new();
        }

        match response.json::<CatalogResponse>().await {
            Ok(catalog) => {
                log::info!("Catalog lists {} editions", catalog.data.len());
                catalog.data
            }
            Err(error) => {
                log::error!("Failed to decode the edition catalog: {}", error);
                Vec::new()
            }
        }
    }
}
