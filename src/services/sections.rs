// src/services/sections.rs

//! Section fetcher service.
//!
//! Builds section URLs of the form `{base}/{scheme}/{number}/{edition}` and
//! fetches the raw verse records for one section. The three outcomes are a
//! tagged result so callers cannot conflate "no data" with "error":
//! an empty verse list is a data-shape anomaly, not a transport fault, and
//! is never retried.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::models::{Edition, RawAyah, SectionScheme};

/// Outcome of fetching one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionFetch {
    /// HTTP success with a non-empty verse list
    Ayahs(Vec<RawAyah>),
    /// HTTP success, but the verse list was empty or missing
    Empty,
    /// Non-success status or transport error, after retries
    Failed(String),
}

/// Envelope the section endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
struct SectionResponse {
    data: Option<SectionData>,
}

#[derive(Debug, Deserialize)]
struct SectionData {
    #[serde(default)]
    ayahs: Vec<RawAyah>,
}

/// Service for fetching the verses of one section of one edition.
pub struct SectionFetcher {
    client: Client,
    base_url: String,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl SectionFetcher {
    /// Create a new section fetcher.
    pub fn new(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry_attempts: config.retry_attempts.max(1),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Build the URL for one section of one edition.
    ///
    /// The edition identifier is the final path segment; the failure log
    /// relies on that when mapping a logged URL back to its edition.
    pub fn section_url(
        &self,
        scheme: SectionScheme,
        section_number: u32,
        edition_identifier: &str,
    ) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            scheme.as_str(),
            section_number,
            edition_identifier
        )
    }

    /// Fetch one numbered section of an edition.
    pub async fn fetch_section(
        &self,
        edition: &Edition,
        scheme: SectionScheme,
        section_number: u32,
    ) -> SectionFetch {
        let url = self.section_url(scheme, section_number, &edition.identifier);
        self.fetch_url(&url).await
    }

    /// Fetch a section by its full URL, retrying transport failures with a
    /// fixed backoff. An empty verse list returns immediately: retrying
    /// will not change a structural response.
    pub async fn fetch_url(&self, url: &str) -> SectionFetch {
        let mut last_reason = String::new();

        for attempt in 1..=self.retry_attempts {
            match self.try_fetch(url).await {
                Ok(Some(ayahs)) => return SectionFetch::Ayahs(ayahs),
                Ok(None) => return SectionFetch::Empty,
                Err(reason) => {
                    log::warn!(
                        "Fetch attempt {}/{} failed for {}: {}",
                        attempt,
                        self.retry_attempts,
                        url,
                        reason
                    );
                    last_reason = reason;
                    if attempt < self.retry_attempts {
                        tokio::time::sleep(self.retry_backoff).await;
                    }
                }
            }
        }

        SectionFetch::Failed(last_reason)
    }

    async fn try_fetch(&self, url: &str) -> std::result::Result<Option<Vec<RawAyah>>, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status));
        }

        let envelope: SectionResponse = response.json().await.map_err(|e| e.to_string())?;
        let ayahs = envelope.data.map(|d| d.ayahs).unwrap_or_default();

        if ayahs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ayahs))
        }
    }
}
