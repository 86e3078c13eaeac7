// src/models/mod.rs

//! Domain models for the indexer application.

mod ayah;
mod document;
mod edition;
mod scheme;

// Re-export all public types
pub use ayah::{RawAyah, Sajda, SurahRef};
pub use document::AyahDocument;
pub use edition::Edition;
pub use scheme::SectionScheme;
