// src/index/mod.rs

//! Search index abstractions.
//!
//! The pipeline only needs four operations from the search engine:
//! existence check, delete, create-with-schema, and bulk write. They live
//! behind a trait so tests can substitute an in-memory backend for the
//! REST client.

pub mod client;
pub mod lifecycle;
pub mod schema;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::AyahDocument;

// Re-export for convenience
pub use client::ElasticsearchIndex;
pub use lifecycle::prepare_index;

/// Trait for search index backends.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Whether an index with this name exists.
    async fn exists(&self, index: &str) -> Result<bool>;

    /// Delete an index. Deleting an absent index is not an error.
    async fn delete(&self, index: &str) -> Result<()>;

    /// Create an empty index carrying the ayah document schema.
    async fn create(&self, index: &str) -> Result<()>;

    /// Submit one batch of documents in a single bulk operation.
    ///
    /// `Err` means the whole submission was rejected (batch-level failure).
    /// `Ok` carries the ids of individually rejected documents; accepted
    /// documents in the same batch stay indexed.
    async fn bulk_write(&self, index: &str, documents: &[AyahDocument]) -> Result<Vec<String>>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`SearchIndex`] backend for tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::{AppError, Result};
    use crate::models::AyahDocument;

    use super::SearchIndex;

    /// In-memory backend recording calls and documents per index.
    #[derive(Default)]
    pub struct MemoryIndex {
        indices: Mutex<HashMap<String, HashMap<String, AyahDocument>>>,
        call_log: Mutex<Vec<String>>,
        reject_ids: Vec<String>,
        fail_bulk: bool,
        fail_create: bool,
    }

    impl MemoryIndex {
        /// Reject these document ids on every bulk write.
        pub fn rejecting(mut self, ids: &[&str]) -> Self {
            self.reject_ids = ids.iter().map(|s| s.to_string()).collect();
            self
        }

        /// Reject every bulk submission outright.
        pub fn failing_bulk(mut self) -> Self {
            self.fail_bulk = true;
            self
        }

        /// Fail every index creation.
        pub fn failing_create(mut self) -> Self {
            self.fail_create = true;
            self
        }

        /// Pretend this index already exists (with no documents).
        pub fn seed_index(&self, name: &str) {
            self.indices
                .lock()
                .unwrap()
                .insert(name.to_string(), HashMap::new());
        }

        pub fn calls(&self) -> Vec<String> {
            self.call_log.lock().unwrap().clone()
        }

        pub fn document_count(&self, index: &str) -> Option<usize> {
            self.indices.lock().unwrap().get(index).map(|m| m.len())
        }

        pub fn document_ids(&self, index: &str) -> Vec<String> {
            let mut ids: Vec<String> = self
                .indices
                .lock()
                .unwrap()
                .get(index)
                .map(|m| m.keys().cloned().collect())
                .unwrap_or_default();
            ids.sort_by_key(|id| id.parse::<u32>().unwrap_or(u32::MAX));
            ids
        }

        fn record(&self, call: String) {
            self.call_log.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl SearchIndex for MemoryIndex {
        async fn exists(&self, index: &str) -> Result<bool> {
            self.record(format!("exists {index}"));
            Ok(self.indices.lock().unwrap().contains_key(index))
        }

        async fn delete(&self, index: &str) -> Result<()> {
            self.record(format!("delete {index}"));
            self.indices.lock().unwrap().remove(index);
            Ok(())
        }

        async fn create(&self, index: &str) -> Result<()> {
            self.record(format!("create {index}"));
            if self.fail_create {
                return Err(AppError::search(format!("create {index}"), "HTTP 500"));
            }
            self.indices
                .lock()
                .unwrap()
                .insert(index.to_string(), HashMap::new());
            Ok(())
        }

        async fn bulk_write(
            &self,
            index: &str,
            documents: &[AyahDocument],
        ) -> Result<Vec<String>> {
            self.record(format!("bulk {index} x{}", documents.len()));
            if self.fail_bulk {
                return Err(AppError::search(format!("bulk {index}"), "HTTP 503"));
            }

            let mut indices = self.indices.lock().unwrap();
            let store = indices.entry(index.to_string()).or_default();
            let mut failed = Vec::new();
            for doc in documents {
                if self.reject_ids.contains(&doc.id) {
                    failed.push(doc.id.clone());
                } else {
                    store.insert(doc.id.clone(), doc.clone());
                }
            }
            Ok(failed)
        }
    }
}
