use unicode_normalization::{UnicodeNormalization, is_nfc};

use super::CharFilter;

/// Brings text into a Unicode normalization form.
///
/// Thai input often carries tone marks typed before the vowel below them;
/// composition puts the pair into canonical order so the same word always
/// has the same bytes. Canonical form (NFC) leaves SARA AM alone;
/// compatibility form (NFKC) splits it into NIKHAHIT + SARA AA.
pub struct UnicodeNormalizationCharFilter {
    compatibility: bool,
}

impl UnicodeNormalizationCharFilter {
    /// Canonical composition (NFC).
    pub fn canonical() -> Self {
        Self {
            compatibility: false,
        }
    }

    /// Compatibility composition (NFKC).
    pub fn compatibility() -> Self {
        Self {
            compatibility: true,
        }
    }
}

impl CharFilter for UnicodeNormalizationCharFilter {
    fn filter(&self, input: &str) -> String {
        if self.compatibility {
            return input.nfkc().collect();
        }
        if is_nfc(input) {
            return input.to_string();
        }
        input.nfc().collect()
    }

    fn name(&self) -> &'static str {
        if self.compatibility {
            "nfkc"
        } else {
            "nfc"
        }
    }
}
