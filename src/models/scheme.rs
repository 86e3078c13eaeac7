// src/models/scheme.rs

//! Section schemes: the six fixed ways the corpus is partitioned into
//! numbered units. Section numbers for a scheme run from 1 to `count()`
//! inclusive, with no gaps.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One way of partitioning the corpus into numbered sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SectionScheme {
    /// 604 mushaf pages
    #[default]
    Page,
    /// 30 juz
    Juz,
    /// 114 surahs
    Surah,
    /// 7 manzils
    Manzil,
    /// 556 rukus
    Ruku,
    /// 240 hizb quarters
    HizbQuarter,
}

impl SectionScheme {
    /// All schemes, in display order.
    pub const ALL: [SectionScheme; 6] = [
        SectionScheme::Page,
        SectionScheme::Juz,
        SectionScheme::Surah,
        SectionScheme::Manzil,
        SectionScheme::Ruku,
        SectionScheme::HizbQuarter,
    ];

    /// Total number of sections in this scheme.
    pub fn count(&self) -> u32 {
        match self {
            SectionScheme::Page => 604,
            SectionScheme::Juz => 30,
            SectionScheme::Surah => 114,
            SectionScheme::Manzil => 7,
            SectionScheme::Ruku => 556,
            SectionScheme::HizbQuarter => 240,
        }
    }

    /// URL path segment used by the section API.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionScheme::Page => "page",
            SectionScheme::Juz => "juz",
            SectionScheme::Surah => "surah",
            SectionScheme::Manzil => "manzil",
            SectionScheme::Ruku => "ruku",
            SectionScheme::HizbQuarter => "hizbQuarter",
        }
    }

    /// Whether a section number is in range for this scheme.
    pub fn contains(&self, section_number: u32) -> bool {
        (1..=self.count()).contains(&section_number)
    }
}

impl std::fmt::Display for SectionScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        assert_eq!(SectionScheme::Page.count(), 604);
        assert_eq!(SectionScheme::Juz.count(), 30);
        assert_eq!(SectionScheme::Surah.count(), 114);
        assert_eq!(SectionScheme::Manzil.count(), 7);
        assert_eq!(SectionScheme::Ruku.count(), 556);
        assert_eq!(SectionScheme::HizbQuarter.count(), 240);
    }

    #[test]
    fn test_section_number_range() {
        for scheme in SectionScheme::ALL {
            assert!(!scheme.contains(0));
            assert!(scheme.contains(1));
            assert!(scheme.contains(scheme.count()));
            assert!(!scheme.contains(scheme.count() + 1));
        }
    }

    #[test]
    fn test_url_segment() {
        assert_eq!(SectionScheme::Page.as_str(), "page");
        assert_eq!(SectionScheme::HizbQuarter.as_str(), "hizbQuarter");
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&SectionScheme::HizbQuarter).unwrap();
        assert_eq!(json, "\"hizbQuarter\"");
        let scheme: SectionScheme = serde_json::from_str(&json).unwrap();
        assert_eq!(scheme, SectionScheme::HizbQuarter);
    }
}
