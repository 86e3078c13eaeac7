// src/models/ayah.rs

//! Raw verse records as returned by the section API.

use serde::{Deserialize, Serialize};

/// A verse as the section API returns it. Read-only input to the mapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawAyah {
    /// Global verse number, unique across the whole corpus (1..=6236)
    pub number: u32,

    /// Verse text in the edition's rendering
    pub text: String,

    /// Verse number within its surah
    #[serde(rename = "numberInSurah")]
    pub number_in_surah: u32,

    /// Surah this verse belongs to
    pub surah: SurahRef,

    /// Juz number (1..=30)
    pub juz: u32,

    /// Manzil number (1..=7)
    pub manzil: u32,

    /// Page number (1..=604)
    pub page: u32,

    /// Ruku number (1..=556)
    pub ruku: u32,

    /// Hizb-quarter number (1..=240)
    #[serde(rename = "hizbQuarter")]
    pub hizb_quarter: u32,

    /// Prostration marker: `false` for most verses, a structured marker
    /// for the fifteen sajda verses
    pub sajda: Sajda,
}

/// The surah fields the section API embeds in each verse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurahRef {
    pub number: u32,
    pub name: String,
}

/// Prostration marker. The API sends either the boolean `false` or an
/// object describing the sajda; both shapes are preserved verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Sajda {
    Flag(bool),
    Marker {
        id: u32,
        recommended: bool,
        obligatory: bool,
    },
}

impl Sajda {
    /// Whether this verse carries a prostration.
    pub fn is_sajda(&self) -> bool {
        !matches!(self, Sajda::Flag(false))
    }
}
