// src/index/schema.rs

//! Index schema for ayah documents.
//!
//! The schema is plain data: a mapping of field name to index type,
//! consumed by the lifecycle manager when creating an edition's index.

use serde_json::{Value, json};

/// Index body (mappings) for a per-edition ayah index.
///
/// The global verse number doubles as the document `_id`, so `id` itself
/// is not part of the mapped source fields.
pub fn ayah_mappings() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "edition_identifier": { "type": "keyword" },
                "edition_name": { "type": "keyword" },
                "text": { "type": "text", "analyzer": "arabic" },
                "surah_name": { "type": "keyword" },
                "number_in_surah": { "type": "integer" },
                "number_in_quran": { "type": "integer" },
                "surah_number": { "type": "integer" },
                "juz_number": { "type": "integer" },
                "manzil_number": { "type": "integer" },
                "page_number": { "type": "integer" },
                "ruku_number": { "type": "integer" },
                "hizbQuarter_number": { "type": "integer" },
                "is_sajda": { "type": "object", "enabled": false }
            }
        }
    })
}
