//! Text normalization stage.
//!
//! [`TextNormalizer`] turns raw user text into the cleaned form the
//! segmenter sees. The chain is fixed:
//!
//! 1. drop characters outside the permitted scripts
//! 2. collapse whitespace runs into one space
//! 3. Unicode NFC
//! 4. Thai orthographic clean-up
//! 5. trim
//!
//! Normalization is pure, so results are memoized in the shared
//! [`ContentCache`] when one is attached.
//!
//! # Examples
//!
//! ```
//! use thaifreq::analysis::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new();
//! assert_eq!(normalizer.normalize("  สวัสดี!!  123 hello  "), "สวัสดี hello");
//! assert_eq!(normalizer.normalize(""), "");
//! ```

use std::sync::Arc;

use log::{debug, trace};

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::char_filter::thai::ThaiNormalizationCharFilter;
use crate::analysis::char_filter::unicode_normalize::UnicodeNormalizationCharFilter;
use crate::cache::{CacheKey, CacheStage, CachedValue, ContentCache, Fingerprint};
use crate::perf::OperationTimer;

/// Namespace mixed into every normalization fingerprint. Bump it when the
/// filter chain changes so stale durable entries stop matching.
const NORMALIZER_ID: &str = "normalize/v1";

/// Cleans raw text through a fixed chain of char filters.
pub struct TextNormalizer {
    filters: Vec<Box<dyn CharFilter>>,
    cache: Option<Arc<ContentCache>>,
}

impl TextNormalizer {
    /// Create a normalizer without a cache.
    pub fn new() -> Self {
        TextNormalizer {
            filters: vec![
                Box::new(PatternReplaceCharFilter::permitted_scripts()),
                Box::new(PatternReplaceCharFilter::collapse_whitespace()),
                Box::new(UnicodeNormalizationCharFilter::canonical()),
                Box::new(ThaiNormalizationCharFilter::new()),
            ],
            cache: None,
        }
    }

    /// Memoize results in `cache`.
    pub fn with_cache(mut self, cache: Arc<ContentCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Names of the filters in application order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Cache key for `text`.
    pub fn cache_key(text: &str) -> CacheKey {
        CacheKey::new(
            CacheStage::Normalize,
            Fingerprint::of_parts(&[NORMALIZER_ID, text]),
        )
    }

    /// Normalize `text`. Never fails; empty input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let key = Self::cache_key(text);
        if let Some(cache) = &self.cache {
            if let Some(CachedValue::Text(cleaned)) = cache.get(&key) {
                trace!("normalize cache hit {}", key.fingerprint);
                return cleaned;
            }
        }

        let timer = OperationTimer::start();
        let cleaned = self.apply(text);
        debug!(
            "normalized {} chars into {} chars in {:?}",
            text.chars().count(),
            cleaned.chars().count(),
            timer.stop()
        );

        if let Some(cache) = &self.cache {
            cache.set(key, CachedValue::Text(cleaned.clone()), true);
        }
        cleaned
    }

    fn apply(&self, text: &str) -> String {
        let filtered = self
            .filters
            .iter()
            .fold(text.to_string(), |acc, filter| filter.filter(&acc));
        filtered.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("filters", &self.filter_names())
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_digits_and_symbols() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("ราคา 100 บาท ฿"), "ราคา บาท");
        assert_eq!(normalizer.normalize("๑๒๓ แมว"), "แมว");
        assert_eq!(normalizer.normalize("hello, world!"), "hello world");
    }

    #[test]
    fn test_collapses_and_trims_whitespace() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("\t แมว \n\n  กิน   ปลา  "), "แมว กิน ปลา");
        assert_eq!(normalizer.normalize("   "), "");
        assert_eq!(normalizer.normalize("!!!"), "");
    }

    #[test]
    fn test_thai_rules_applied() {
        let normalizer = TextNormalizer::new();
        // NIKHAHIT + SARA AA folds to SARA AM
        assert_eq!(normalizer.normalize("น\u{0E4D}\u{0E32}"), "น\u{0E33}");
        // doubled SARA E folds to SARA AE
        assert_eq!(normalizer.normalize("\u{0E40}\u{0E40}มว"), "แมว");
        // doubled tone mark
        assert_eq!(normalizer.normalize("ก\u{0E48}\u{0E48}"), "ก\u{0E48}");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = TextNormalizer::new();
        let inputs = [
            "  ประเทศไทย!!  มีวัฒนธรรม 123 ที่หลากหลาย  ",
            "\u{0E48}\u{0E48}แมว  เเมว",
            "Hello   World ภาษาไทย",
            "",
            "ๆๆ ฯ",
        ];
        for input in inputs {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_cached_result_reused() {
        let cache = Arc::new(ContentCache::memory_only(128));
        let normalizer = TextNormalizer::new().with_cache(cache.clone());

        let first = normalizer.normalize("แมว 1 ตัว");
        let second = normalizer.normalize("แมว 1 ตัว");
        assert_eq!(first, second);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.memory_hits, 1);
    }

    #[test]
    fn test_empty_input_skips_cache() {
        let cache = Arc::new(ContentCache::memory_only(128));
        let normalizer = TextNormalizer::new().with_cache(cache.clone());
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(cache.stats().total_requests, 0);
    }
}
