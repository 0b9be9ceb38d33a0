//! Token types and frequency tables for text analysis.
//!
//! # Core Types
//!
//! - [`TaggedToken`] - A word paired with its grammatical category code
//! - [`FrequencyTable`] - Insertion-ordered word (or tag) counter
//!
//! Tag codes follow the ORCHID convention used by Thai taggers
//! (`NCMN`, `VACT`, `VSTA`, ...) with the universal `NOUN`/`VERB`
//! codes accepted alongside them.
//!
//! # Examples
//!
//! ```
//! use thaifreq::analysis::token::{FrequencyTable, TaggedToken};
//!
//! let tokens = vec![
//!     TaggedToken::new("แมว", "NCMN"),
//!     TaggedToken::new("กิน", "VACT"),
//!     TaggedToken::new("แมว", "NCMN"),
//! ];
//!
//! let counts = FrequencyTable::from_words(tokens.iter().map(|t| t.word.as_str()));
//! assert_eq!(counts.get("แมว"), 2);
//! assert_eq!(counts.most_common(1), vec![("แมว".to_string(), 2)]);
//! ```

use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Common noun.
pub const TAG_NOUN_COMMON: &str = "NCMN";
/// Active verb.
pub const TAG_VERB_ACTIVE: &str = "VACT";
/// Stative verb.
pub const TAG_VERB_STATIVE: &str = "VSTA";
/// Universal noun.
pub const TAG_NOUN: &str = "NOUN";
/// Universal verb.
pub const TAG_VERB: &str = "VERB";

/// Tags kept by the POS filter when the caller does not supply a set.
pub const DEFAULT_ACCEPTED_TAGS: &[&str] = &[
    TAG_NOUN,
    TAG_VERB,
    TAG_NOUN_COMMON,
    TAG_VERB_ACTIVE,
    TAG_VERB_STATIVE,
];

/// A word together with the grammatical category assigned to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedToken {
    /// The surface form of the word (non-empty, trimmed).
    pub word: String,

    /// Grammatical category code.
    pub tag: String,
}

impl TaggedToken {
    /// Create a new tagged token.
    pub fn new<W: Into<String>, T: Into<String>>(word: W, tag: T) -> Self {
        TaggedToken {
            word: word.into(),
            tag: tag.into(),
        }
    }

    /// Length of the word in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.word.chars().count()
    }

    /// Whether the word consists solely of ASCII Latin letters.
    pub fn is_latin(&self) -> bool {
        !self.word.is_empty() && self.word.chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.word, self.tag)
    }
}

/// A counter that remembers the order in which keys were first seen.
///
/// Ties in [`most_common`](Self::most_common) are broken by that order,
/// so two tables fed the same sequence always rank identically.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(String, u64)>", into = "Vec<(String, u64)>")]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: AHashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every word of the iterator once.
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::new();
        for word in words {
            table.add(word, 1);
        }
        table
    }

    /// Add `count` occurrences of `key`.
    pub fn add(&mut self, key: &str, count: u64) {
        if let Some(&slot) = self.index.get(key) {
            self.entries[slot].1 += count;
        } else {
            self.index.insert(key.to_string(), self.entries.len());
            self.entries.push((key.to_string(), count));
        }
    }

    /// Merge another table into this one, preserving first-seen order.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (key, count) in &other.entries {
            self.add(key, *count);
        }
    }

    /// Count for `key`, zero when unseen.
    pub fn get(&self, key: &str) -> u64 {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// The `n` highest counts, descending; equal counts keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked = self.entries.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl From<Vec<(String, u64)>> for FrequencyTable {
    fn from(entries: Vec<(String, u64)>) -> Self {
        let mut table = FrequencyTable::new();
        for (key, count) in entries {
            table.add(&key, count);
        }
        table
    }
}

impl From<FrequencyTable> for Vec<(String, u64)> {
    fn from(table: FrequencyTable) -> Self {
        table.entries
    }
}

/// Tables are equal when they hold the same counts, whatever order the
/// words were first seen in.
impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, count)| other.get(key) == count)
    }
}

impl Eq for FrequencyTable {}
