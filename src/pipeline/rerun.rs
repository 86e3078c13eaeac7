// src/pipeline/rerun.rs

//! Rerun processor.
//!
//! Replays fetch + map + bulk write for exactly the section URLs recorded
//! in a failure log. Indices are assumed to exist from the original run;
//! rerun never touches index lifecycle, it only backfills missing
//! documents (document ids are stable, so replaying is safe to repeat).

use std::collections::HashMap;
use std::path::Path;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::index::SearchIndex;
use crate::models::Edition;
use crate::pipeline::failure_log::{self, FailureLog, FailureRecord};
use crate::pipeline::ingest::{IngestStats, index_name, ingest_section};
use crate::services::{EditionCatalog, SectionFetcher};

/// The `{edition, url}` pairs a log resolves to, deduplicated in
/// first-seen order. A section that logged several document failures
/// replays once.
pub fn replay_pairs(records: &[FailureRecord]) -> Vec<(String, String)> {
    let mut seen = std::collections::HashSet::new();
    let mut pairs = Vec::new();

    for record in records {
        let Some(edition) = record.edition_identifier() else {
            log::warn!("No edition identifier recoverable from '{}'", record.url);
            continue;
        };
        let pair = (edition, record.url.clone());
        if seen.insert(pair.clone()) {
            pairs.push(pair);
        }
    }

    pairs
}

/// Replay every failed section URL in the given log.
pub async fn run_rerun(
    config: &Config,
    catalog: &EditionCatalog,
    fetcher: &SectionFetcher,
    backend: &dyn SearchIndex,
    failure_log: &FailureLog,
    links_path: &Path,
) -> Result<IngestStats> {
    let records = failure_log::read_entries(links_path)?;
    let pairs = replay_pairs(&records);
    if pairs.is_empty() {
        log::warn!("No replayable entries in {}", links_path.display());
        return Ok(IngestStats::default());
    }

    // Edition names for the mapped documents come from the live catalog.
    let editions = catalog.list_editions().await;
    if editions.is_empty() {
        return Err(AppError::CatalogUnavailable(
            "catalog returned no editions; cannot resolve edition names".to_string(),
        ));
    }
    let by_identifier: HashMap<&str, &Edition> = editions
        .iter()
        .map(|e| (e.identifier.as_str(), e))
        .collect();

    log::info!(
        "Replaying {} failed sections from {}",
        pairs.len(),
        links_path.display()
    );

    let mut stats = IngestStats::default();
    for (identifier, url) in &pairs {
        let Some(edition) = by_identifier.get(identifier.as_str()).copied() else {
            log::warn!(
                "Skipping {}: edition '{}' not in the catalog",
                url,
                identifier
            );
            continue;
        };

        let index_name = index_name(&config.search.index_prefix, &edition.identifier);
        let outcome = fetcher.fetch_url(url).await;
        ingest_section(backend, failure_log, edition, &index_name, url, outcome, &mut stats)
            .await;
    }

    log::info!(
        "Rerun complete: {} sections indexed, {} documents backfilled, \
         {} fetch failures, {} write failures",
        stats.sections_indexed,
        stats.documents_indexed,
        stats.sections_fetch_failed,
        stats.sections_write_failed,
    );

    Ok(stats)
}
