// src/pipeline/ingest.rs

//! Ingestion orchestrator.
//!
//! Sequences the full run: catalog → per-edition index lifecycle →
//! section fetch → document mapping → bulk write. Editions are independent
//! units: a lifecycle failure aborts only its edition, a section failure
//! only that section. Only an unavailable catalog aborts the run.

use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::index::{SearchIndex, prepare_index};
use crate::models::{AyahDocument, Edition};
use crate::pipeline::failure_log::{FailureKind, FailureLog, FailureRecord};
use crate::services::{EditionCatalog, SectionFetch, SectionFetcher};

/// Counters for one run (or one edition; totals merge upward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub editions_completed: usize,
    pub editions_aborted: usize,
    pub sections_indexed: usize,
    pub sections_empty: usize,
    pub sections_fetch_failed: usize,
    pub sections_write_failed: usize,
    pub documents_indexed: usize,
    pub documents_failed: usize,
}

impl IngestStats {
    /// Fold another stats block into this one.
    pub fn merge(&mut self, other: &IngestStats) {
        self.editions_completed += other.editions_completed;
        self.editions_aborted += other.editions_aborted;
        self.sections_indexed += other.sections_indexed;
        self.sections_empty += other.sections_empty;
        self.sections_fetch_failed += other.sections_fetch_failed;
        self.sections_write_failed += other.sections_write_failed;
        self.documents_indexed += other.documents_indexed;
        self.documents_failed += other.documents_failed;
    }
}

/// Name of the index holding one edition's documents.
pub fn index_name(prefix: &str, edition_identifier: &str) -> String {
    format!("{prefix}{edition_identifier}")
}

/// Process every edition the catalog lists.
///
/// Partial failures are logged and counted, never fatal; the only hard
/// error is an empty or unreachable catalog.
pub async fn run_ingest(
    config: &Config,
    catalog: &EditionCatalog,
    fetcher: &SectionFetcher,
    backend: &dyn SearchIndex,
    failure_log: &FailureLog,
) -> Result<IngestStats> {
    let editions = catalog.list_editions().await;
    if editions.is_empty() {
        return Err(AppError::CatalogUnavailable(
            "catalog returned no editions; nothing to ingest".to_string(),
        ));
    }

    let scheme = config.run.scheme;
    log::info!(
        "Ingesting {} editions, {} scheme ({} sections each)",
        editions.len(),
        scheme,
        scheme.count()
    );

    let mut totals = IngestStats::default();
    for edition in &editions {
        match process_edition(config, fetcher, backend, failure_log, edition).await {
            Ok(stats) => {
                totals.merge(&stats);
                totals.editions_completed += 1;
            }
            Err(error) => {
                // Lifecycle failure: this edition cannot accept writes.
                // Other editions continue untouched.
                log::error!("Aborting edition '{}': {}", edition.identifier, error);
                totals.editions_aborted += 1;
            }
        }
    }

    log::info!(
        "Run complete: {} editions done, {} aborted; {} sections indexed, \
         {} empty, {} fetch failures, {} write failures; {} documents indexed, {} rejected",
        totals.editions_completed,
        totals.editions_aborted,
        totals.sections_indexed,
        totals.sections_empty,
        totals.sections_fetch_failed,
        totals.sections_write_failed,
        totals.documents_indexed,
        totals.documents_failed,
    );

    Ok(totals)
}

/// Ingest one edition: fresh index, then every section of the configured
/// scheme in order, each section's outcome independent of the previous.
async fn process_edition(
    config: &Config,
    fetcher: &SectionFetcher,
    backend: &dyn SearchIndex,
    failure_log: &FailureLog,
    edition: &Edition,
) -> Result<IngestStats> {
    let index_name = index_name(&config.search.index_prefix, &edition.identifier);
    log::info!(
        "Processing edition '{}' into index '{}'",
        edition.identifier,
        index_name
    );

    // The index must be ready before any section worker starts.
    prepare_index(backend, &index_name).await?;

    let scheme = config.run.scheme;
    let concurrency = config.api.max_concurrent.max(1);
    let delay = Duration::from_millis(config.api.request_delay_ms);

    let mut stats = IngestStats::default();
    let mut sections = stream::iter(1..=scheme.count())
        .map(|section_number| {
            let url = fetcher.section_url(scheme, section_number, &edition.identifier);
            async move {
                let outcome = fetcher.fetch_url(&url).await;
                (url, outcome)
            }
        })
        .buffer_unordered(concurrency);

    while let Some((url, outcome)) = sections.next().await {
        ingest_section(backend, failure_log, edition, &index_name, &url, outcome, &mut stats)
            .await;

        if delay.as_millis() > 0 {
            tokio::time::sleep(delay).await;
        }
    }

    log::info!(
        "Edition '{}' done: {}/{} sections indexed, {} documents",
        edition.identifier,
        stats.sections_indexed,
        scheme.count(),
        stats.documents_indexed
    );
    Ok(stats)
}

/// Apply one section's fetch outcome: map and write verses, or record the
/// failure. Shared by the normal run and the rerun processor.
pub(crate) async fn ingest_section(
    backend: &dyn SearchIndex,
    failure_log: &FailureLog,
    edition: &Edition,
    index_name: &str,
    url: &str,
    outcome: SectionFetch,
    stats: &mut IngestStats,
) {
    match outcome {
        SectionFetch::Ayahs(ayahs) => {
            let documents: Vec<AyahDocument> = ayahs
                .iter()
                .map(|ayah| AyahDocument::from_raw(edition, ayah))
                .collect();
            write_section(backend, failure_log, edition, index_name, url, &documents, stats)
                .await;
        }
        SectionFetch::Empty => {
            // Data-shape anomaly, not a transport fault.
            stats.sections_empty += 1;
            log::warn!("Ayahs not found for {}", url);
            failure_log.append(&FailureRecord::new(
                FailureKind::SectionEmpty,
                &edition.identifier,
                url,
                "ayahs not found",
            ));
        }
        SectionFetch::Failed(reason) => {
            stats.sections_fetch_failed += 1;
            log::error!("Failed to fetch {}: {}", url, reason);
            failure_log.append(&FailureRecord::new(
                FailureKind::SectionFetch,
                &edition.identifier,
                url,
                reason,
            ));
        }
    }
}

/// Bulk-write one section's batch, distinguishing batch-level rejection
/// from per-document failures.
async fn write_section(
    backend: &dyn SearchIndex,
    failure_log: &FailureLog,
    edition: &Edition,
    index_name: &str,
    url: &str,
    documents: &[AyahDocument],
    stats: &mut IngestStats,
) {
    match backend.bulk_write(index_name, documents).await {
        Ok(failed_ids) => {
            stats.sections_indexed += 1;
            stats.documents_indexed += documents.len() - failed_ids.len();
            stats.documents_failed += failed_ids.len();

            // Rejected documents are logged one by one; the rest of the
            // batch stays committed.
            for id in failed_ids {
                log::error!("Failed to index document {} from {}", id, url);
                failure_log.append(
                    &FailureRecord::new(
                        FailureKind::Document,
                        &edition.identifier,
                        url,
                        "document rejected by index",
                    )
                    .with_document_id(id),
                );
            }
        }
        Err(error) => {
            stats.sections_write_failed += 1;
            log::error!("Error during bulk indexing for {}: {}", url, error);
            failure_log.append(&FailureRecord::new(
                FailureKind::BatchWrite,
                &edition.identifier,
                url,
                error.to_string(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::testing::MemoryIndex;
    use crate::models::{RawAyah, Sajda, SurahRef};
    use crate::pipeline::failure_log::read_entries;

    fn sample_edition() -> Edition {
        Edition {
            identifier: "quran-simple".to_string(),
            name: "المبسط".to_string(),
        }
    }

    fn sample_ayahs(numbers: &[u32]) -> Vec<RawAyah> {
        numbers
            .iter()
            .map(|&n| RawAyah {
                number: n,
                text: format!("ayah {n}"),
                number_in_surah: n,
                surah: SurahRef {
                    number: 1,
                    name: "سورة الفاتحة".to_string(),
                },
                juz: 1,
                manzil: 1,
                page: 1,
                ruku: 1,
                hizb_quarter: 1,
                sajda: Sajda::Flag(false),
            })
            .collect()
    }

    fn temp_log() -> (tempfile::TempDir, FailureLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = FailureLog::open(dir.path().join("failed_links.log")).unwrap();
        (dir, log)
    }

    const URL: &str = "http://api.alquran.cloud/v1/page/1/quran-simple";

    #[test]
    fn test_index_name() {
        assert_eq!(index_name("ayahs_in_", "quran-simple"), "ayahs_in_quran-simple");
    }

    #[tokio::test]
    async fn test_section_all_documents_accepted() {
        let backend = MemoryIndex::default();
        let (_dir, log) = temp_log();
        let mut stats = IngestStats::default();

        ingest_section(
            &backend,
            &log,
            &sample_edition(),
            "ayahs_in_quran-simple",
            URL,
            SectionFetch::Ayahs(sample_ayahs(&[1, 2, 3])),
            &mut stats,
        )
        .await;

        assert_eq!(stats.sections_indexed, 1);
        assert_eq!(stats.documents_indexed, 3);
        assert_eq!(stats.documents_failed, 0);
        assert_eq!(
            backend.document_ids("ayahs_in_quran-simple"),
            vec!["1", "2", "3"]
        );
        assert!(read_entries(log.path()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_document_failure_is_isolated() {
        let backend = MemoryIndex::default().rejecting(&["2"]);
        let (_dir, log) = temp_log();
        let mut stats = IngestStats::default();

        ingest_section(
            &backend,
            &log,
            &sample_edition(),
            "ayahs_in_quran-simple",
            URL,
            SectionFetch::Ayahs(sample_ayahs(&[1, 2, 3])),
            &mut stats,
        )
        .await;

        // Accepted neighbors stay indexed; the rejected id does not.
        assert_eq!(
            backend.document_ids("ayahs_in_quran-simple"),
            vec!["1", "3"]
        );
        assert_eq!(stats.documents_indexed, 2);
        assert_eq!(stats.documents_failed, 1);

        let entries = read_entries(log.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, FailureKind::Document);
        assert_eq!(entries[0].url, URL);
        assert_eq!(entries[0].document_id.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_batch_write_failure_logs_section_url() {
        let backend = MemoryIndex::default().failing_bulk();
        let (_dir, log) = temp_log();
        let mut stats = IngestStats::default();

        ingest_section(
            &backend,
            &log,
            &sample_edition(),
            "ayahs_in_quran-simple",
            URL,
            SectionFetch::Ayahs(sample_ayahs(&[1, 2])),
            &mut stats,
        )
        .await;

        assert_eq!(stats.sections_write_failed, 1);
        assert_eq!(stats.documents_indexed, 0);

        let entries = read_entries(log.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, FailureKind::BatchWrite);
        assert_eq!(entries[0].url, URL);
    }

    #[tokio::test]
    async fn test_empty_section_is_anomaly_not_fault() {
        let backend = MemoryIndex::default();
        let (_dir, log) = temp_log();
        let mut stats = IngestStats::default();

        ingest_section(
            &backend,
            &log,
            &sample_edition(),
            "ayahs_in_quran-simple",
            URL,
            SectionFetch::Empty,
            &mut stats,
        )
        .await;

        assert_eq!(stats.sections_empty, 1);
        assert_eq!(stats.sections_fetch_failed, 0);
        let entries = read_entries(log.path()).unwrap();
        assert_eq!(entries[0].kind, FailureKind::SectionEmpty);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_logged_and_counted() {
        let backend = MemoryIndex::default();
        let (_dir, log) = temp_log();
        let mut stats = IngestStats::default();

        ingest_section(
            &backend,
            &log,
            &sample_edition(),
            "ayahs_in_quran-simple",
            "http://api.alquran.cloud/v1/page/37/quran-simple",
            SectionFetch::Failed("HTTP 500 Internal Server Error".to_string()),
            &mut stats,
        )
        .await;

        assert_eq!(stats.sections_fetch_failed, 1);
        // No documents from the failed section reach the index.
        assert_eq!(backend.document_count("ayahs_in_quran-simple"), None);

        let entries = read_entries(log.path()).unwrap();
        assert_eq!(entries[0].kind, FailureKind::SectionFetch);
        assert_eq!(entries[0].url, "http://api.alquran.cloud/v1/page/37/quran-simple");
        assert_eq!(entries[0].reason, "HTTP 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_rewriting_a_section_is_idempotent() {
        let backend = MemoryIndex::default();
        let (_dir, log) = temp_log();
        let mut stats = IngestStats::default();

        for _ in 0..2 {
            ingest_section(
                &backend,
                &log,
                &sample_edition(),
                "ayahs_in_quran-simple",
                URL,
                SectionFetch::Ayahs(sample_ayahs(&[5, 6])),
                &mut stats,
            )
            .await;
        }

        // Same ids overwrite, no duplicates.
        assert_eq!(backend.document_ids("ayahs_in_quran-simple"), vec!["5", "6"]);
    }

    #[test]
    fn test_stats_merge() {
        let mut totals = IngestStats {
            sections_indexed: 2,
            documents_indexed: 10,
            ..IngestStats::default()
        };
        totals.merge(&IngestStats {
            sections_indexed: 1,
            sections_empty: 1,
            documents_indexed: 4,
            documents_failed: 2,
            ..IngestStats::default()
        });

        assert_eq!(totals.sections_indexed, 3);
        assert_eq!(totals.sections_empty, 1);
        assert_eq!(totals.documents_indexed, 14);
        assert_eq!(totals.documents_failed, 2);
    }
}
