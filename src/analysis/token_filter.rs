//! Token filter implementations for tagged token sequences.
//!
//! Filters take the tagger's output and return the subsequence worth
//! counting. They never reorder or rewrite tokens.
//!
//! # Available Filters
//!
//! - [`pos::PosFilter`] - Keeps content words whose tag is accepted
//!
//! Stop word lists live in [`stop`].
//!
//! # Examples
//!
//! ```
//! use thaifreq::analysis::token::TaggedToken;
//! use thaifreq::analysis::token_filter::TokenFilter;
//! use thaifreq::analysis::token_filter::pos::PosFilter;
//!
//! let filter = PosFilter::default();
//! let tokens = vec![
//!     TaggedToken::new("แมว", "NCMN"),
//!     TaggedToken::new("ที่", "PREL"),
//!     TaggedToken::new("กิน", "VACT"),
//! ];
//! let kept: Vec<_> = filter.filter(tokens).into_iter().map(|t| t.word).collect();
//! assert_eq!(kept, ["แมว", "กิน"]);
//! ```

pub mod pos;
pub mod stop;

use crate::analysis::token::TaggedToken;

/// Trait for filters over tagged tokens.
pub trait TokenFilter: Send + Sync {
    /// Return the tokens to keep, in their original order.
    fn filter(&self, tokens: Vec<TaggedToken>) -> Vec<TaggedToken>;

    /// Get the name of this filter.
    fn name(&self) -> &'static str;
}
