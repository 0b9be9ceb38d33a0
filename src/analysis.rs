//! Text analysis pipeline stages.
//!
//! Raw text flows through these stages in order:
//!
//! ```text
//! raw text → TextNormalizer → TokenTagger → PosFilter → counts
//! ```
//!
//! - [`normalizer`] cleans the text through the [`char_filter`] chain
//! - [`tagger`] segments and tags it through a [`tokenizer::LinguisticAnalyzer`]
//! - [`token_filter`] keeps the content words worth counting

pub mod char_filter;
pub mod normalizer;
pub mod tagger;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
