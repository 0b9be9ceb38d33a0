//! Word segmentation and part-of-speech tagging.
//!
//! Thai is written without spaces between words, so splitting cleaned text
//! into words needs a segmenter, and each word then needs a grammatical
//! category. Both jobs sit behind the [`LinguisticAnalyzer`] trait so the
//! rest of the pipeline does not care which engine does them.
//!
//! # Built-in Implementations
//!
//! - [`dictionary::DictionarySegmenter`] - Longest-match segmentation over a lexicon
//! - [`lexicon::LexiconTagger`] - Tag lookup with a fallback category
//! - [`pipeline::PipelineAnalyzer`] - A segmenter followed by a tagger
//!
//! # Examples
//!
//! ```
//! use thaifreq::analysis::tokenizer::LinguisticAnalyzer;
//! use thaifreq::analysis::tokenizer::pipeline::PipelineAnalyzer;
//!
//! let analyzer = PipelineAnalyzer::builtin();
//! let tokens = analyzer.segment_and_tag("แมวกินปลา").unwrap();
//! let words: Vec<_> = tokens.iter().map(|t| t.word.as_str()).collect();
//! assert_eq!(words, ["แมว", "กิน", "ปลา"]);
//! ```

pub mod dictionary;
pub mod lexicon;
pub mod pipeline;

use crate::analysis::token::TaggedToken;
use crate::error::Result;

/// Splits cleaned text into words.
pub trait Segmenter: Send + Sync {
    /// Segment `text` into words. Whitespace never appears in the output.
    fn segment(&self, text: &str) -> Result<Vec<String>>;

    /// Get the name of this segmenter.
    fn name(&self) -> &'static str;
}

/// Assigns a grammatical category to each word.
pub trait Tagger: Send + Sync {
    /// Tag `words`, returning one token per word in the same order.
    fn tag(&self, words: &[String]) -> Result<Vec<TaggedToken>>;

    /// Get the name of this tagger.
    fn name(&self) -> &'static str;
}

/// Segments and tags text in one call.
///
/// Implementations may block or fail; the caller decides what to do about
/// either. Output must be deterministic for a given input, because
/// results are cached by content.
pub trait LinguisticAnalyzer: Send + Sync {
    /// Produce the tagged words of `text`, in reading order.
    fn segment_and_tag(&self, text: &str) -> Result<Vec<TaggedToken>>;

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;

    /// Identity used when caching results of this analyzer.
    ///
    /// Two analyzers with the same identity must produce the same output.
    fn identity(&self) -> String {
        self.name().to_string()
    }
}
