// src/lib.rs

//! Quran edition ingestion and bulk-indexing pipeline.
//!
//! Discovers editions from the alquran.cloud catalog, pages through a
//! section scheme per edition, maps raw verses to index documents, and
//! bulk-writes them into one search index per edition. Failed section
//! URLs land in an append-only log that the rerun mode replays.

pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
