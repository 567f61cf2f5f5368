//! Normalized join keys for matching boundaries against metrics.
//!
//! Both sides of every district lookup go through [`normalize_key_text`], so
//! `" Kebayoran  Baru"` and `"KEBAYORAN BARU"` resolve to the same key.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// District marker the upstream standardization step writes when it could not
/// resolve a branch address to a district.
pub const UNRESOLVED_DISTRICT: &str = "Not Found";

/// Trim, collapse inner whitespace, NFC-normalize and lowercase.
pub fn normalize_key_text(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.nfc().collect::<String>().to_lowercase()
}

pub fn is_unresolved_district(value: &str) -> bool {
    normalize_key_text(value) == normalize_key_text(UNRESOLVED_DISTRICT)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DistrictKey {
    pub district: String,
    pub regency: String,
}

impl DistrictKey {
    pub fn new(district: &str, regency: &str) -> Self {
        Self {
            district: normalize_key_text(district),
            regency: normalize_key_text(regency),
        }
    }
}

impl fmt::Display for DistrictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.district, self.regency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_folds_case_and_whitespace() {
        assert_eq!(normalize_key_text("  Kebayoran   Baru "), "kebayoran baru");
        assert_eq!(normalize_key_text("KEBAYORAN BARU"), "kebayoran baru");
        assert_eq!(normalize_key_text("\tTanah\nAbang"), "tanah abang");
        assert_eq!(normalize_key_text("   "), "");
    }

    #[test]
    fn normalization_composes_unicode() {
        let decomposed = "Cafe\u{301}";
        let composed = "caf\u{e9}";
        assert_eq!(normalize_key_text(decomposed), composed);
    }

    #[test]
    fn keys_match_across_spelling_noise() {
        let left = DistrictKey::new("Menteng ", "Jakarta Pusat");
        let right = DistrictKey::new("menteng", " JAKARTA  PUSAT");
        assert_eq!(left, right);
        assert_eq!(left.to_string(), "menteng / jakarta pusat");
    }

    #[test]
    fn unresolved_marker_is_case_insensitive() {
        assert!(is_unresolved_district("Not Found"));
        assert!(is_unresolved_district(" not  found "));
        assert!(!is_unresolved_district("Menteng"));
    }
}
