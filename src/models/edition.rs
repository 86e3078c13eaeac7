// src/models/edition.rs

//! Edition catalog record.

use serde::{Deserialize, Serialize};

/// One textual edition of the corpus, as listed by the edition catalog.
///
/// The catalog returns more fields (language, format, type); only the two
/// the pipeline needs are kept. `identifier` doubles as the index-name
/// suffix and the final path segment of every section URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edition {
    /// Unique identifier, e.g. `quran-simple`
    pub identifier: String,

    /// Display name
    pub name: String,
}
