// src/services/mod.rs

//! Services that talk to the remote edition/section API.

mod catalog;
mod sections;

pub use catalog::EditionCatalog;
pub use sections::{SectionFetch, SectionFetcher};
