//! Part-of-speech filtering.
//!
//! A token survives when all of the following hold:
//!
//! - its word is longer than one character
//! - its word is not a stop word
//! - its tag matches an accepted tag, where "matches" means either string
//!   contains the other (`NCMN` accepts `NCMNX`, `NOUN` accepts `N`).
//!   An empty tag never matches.

use std::sync::Arc;

use crate::analysis::token::{DEFAULT_ACCEPTED_TAGS, TaggedToken};

use super::TokenFilter;
use super::stop::{StopWords, StopwordSource};

/// Minimum word length, in characters, of a kept token.
const MIN_WORD_CHARS: usize = 2;

/// Whether `tag` matches `accepted`: either is a substring of the other.
pub fn tag_matches(tag: &str, accepted: &str) -> bool {
    if tag.is_empty() || accepted.is_empty() {
        return false;
    }
    accepted.contains(tag) || tag.contains(accepted)
}

/// Keeps content words with an accepted tag.
#[derive(Clone)]
pub struct PosFilter {
    accepted: Vec<String>,
    stop_words: Arc<dyn StopwordSource>,
}

impl PosFilter {
    pub fn new(accepted: Vec<String>, stop_words: Arc<dyn StopwordSource>) -> Self {
        PosFilter {
            accepted,
            stop_words,
        }
    }

    /// Default tags with the given stop word source.
    pub fn with_stop_words(stop_words: Arc<dyn StopwordSource>) -> Self {
        Self::new(
            DEFAULT_ACCEPTED_TAGS.iter().map(|t| t.to_string()).collect(),
            stop_words,
        )
    }

    /// Tags accepted when the caller names none.
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    /// Filter `tokens` against an explicit tag set instead of the default.
    pub fn filter_with<S: AsRef<str>>(
        &self,
        tokens: &[TaggedToken],
        accepted: &[S],
    ) -> Vec<TaggedToken> {
        tokens
            .iter()
            .filter(|token| self.keeps(token, accepted))
            .cloned()
            .collect()
    }

    fn keeps<S: AsRef<str>>(&self, token: &TaggedToken, accepted: &[S]) -> bool {
        token.char_len() >= MIN_WORD_CHARS
            && !self.stop_words.contains(&token.word)
            && accepted
                .iter()
                .any(|accepted| tag_matches(&token.tag, accepted.as_ref()))
    }
}

impl Default for PosFilter {
    fn default() -> Self {
        Self::with_stop_words(Arc::new(StopWords::default()))
    }
}

impl TokenFilter for PosFilter {
    fn filter(&self, tokens: Vec<TaggedToken>) -> Vec<TaggedToken> {
        tokens
            .into_iter()
            .filter(|token| self.keeps(token, self.accepted.as_slice()))
            .collect()
    }

    fn name(&self) -> &'static str {
        "pos"
    }
}

impl std::fmt::Debug for PosFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosFilter")
            .field("accepted", &self.accepted)
            .finish_non_exhaustive()
    }
}
