//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the raw text before it reaches the segmenter. The
//! [`TextNormalizer`](crate::analysis::normalizer::TextNormalizer) chains
//! them in a fixed order.
//!
//! # Available Filters
//!
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!   (used for the permitted-script filter and whitespace collapsing)
//! - [`unicode_normalize::UnicodeNormalizationCharFilter`] - Canonical or compatibility composition
//! - [`thai::ThaiNormalizationCharFilter`] - Thai orthographic clean-up
//!
//! # Examples
//!
//! ```
//! use thaifreq::analysis::char_filter::CharFilter;
//! use thaifreq::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::collapse_whitespace();
//! assert_eq!(filter.filter("a  \t b"), "a b");
//! ```

/// Trait for character filters that transform text before tokenization.
///
/// Filters must be deterministic: the same input always yields the same
/// output, which is what makes normalized text safe to cache.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod pattern_replace;
pub mod thai;
pub mod unicode_normalize;
