// src/models/document.rs

//! Canonical indexed-document shape, one per verse per edition.

use serde::{Deserialize, Serialize};

use super::{Edition, RawAyah, Sajda};

/// The document persisted in a per-edition index.
///
/// `id` is the global verse number rendered as a string, so writing the
/// same verse twice overwrites instead of appending; reruns of a failed
/// section are idempotent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AyahDocument {
    /// Document id, equal to `number_in_quran`
    pub id: String,

    pub edition_identifier: String,
    pub edition_name: String,

    pub text: String,
    pub number_in_surah: u32,
    pub number_in_quran: u32,
    pub surah_name: String,
    pub surah_number: u32,

    pub juz_number: u32,
    pub manzil_number: u32,
    pub page_number: u32,
    pub ruku_number: u32,
    #[serde(rename = "hizbQuarter_number")]
    pub hizb_quarter_number: u32,

    /// Prostration marker, copied verbatim from the source record
    pub is_sajda: Sajda,
}

impl AyahDocument {
    /// Map a raw API verse plus edition metadata to its indexed form.
    ///
    /// Pure and deterministic: the same `(edition, ayah)` pair always
    /// yields the same document.
    pub fn from_raw(edition: &Edition, ayah: &RawAyah) -> Self {
        Self {
            id: ayah.number.to_string(),
            edition_identifier: edition.identifier.clone(),
            edition_name: edition.name.clone(),
            text: ayah.text.clone(),
            number_in_surah: ayah.number_in_surah,
            number_in_quran: ayah.number,
            surah_name: ayah.surah.name.clone(),
            surah_number: ayah.surah.number,
            juz_number: ayah.juz,
            manzil_number: ayah.manzil,
            page_number: ayah.page,
            ruku_number: ayah.ruku,
            hizb_quarter_number: ayah.hizb_quarter,
            is_sajda: ayah.sajda.clone(),
        }
    }
}
