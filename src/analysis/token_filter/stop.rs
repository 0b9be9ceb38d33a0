//! Stop word lists.
//!
//! The POS filter asks a [`StopwordSource`] whether a word should be dropped.
//! [`StopWords`] is the stock implementation: a default Thai list plus the
//! common English function words, optionally extended by configuration.
//!
//! # Examples
//!
//! ```
//! use thaifreq::analysis::token_filter::stop::{StopWords, StopwordSource};
//!
//! let stop_words = StopWords::default().with_extra(["แมว"]);
//! assert!(stop_words.contains("ที่"));
//! assert!(stop_words.contains("the"));
//! assert!(stop_words.contains("แมว"));
//! assert!(!stop_words.contains("ปลา"));
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default Thai stop words: particles, pronouns, auxiliaries, conjunctions
/// and other high-frequency function words.
const DEFAULT_THAI_STOP_WORDS: &[&str] = &[
    "กว่า", "กับ", "การ", "ก็", "ก่อน", "ขณะ", "ขอ", "ของ", "ขึ้น", "คง", "ครับ", "ความ", "คะ",
    "ค่ะ", "คือ", "คุณ", "จน", "จริง", "จะ", "จัด", "จาก", "จึง", "ฉัน", "ช่วง", "ซึ่ง", "ด้วย",
    "ดัง", "ต่อ", "ตาม", "ตั้งแต่", "ต้อง", "ถึง", "ถ้า", "ทั้ง", "ทาง", "ที่", "ทุก", "ท่าน", "นอกจาก",
    "นั้น", "นี้", "นะ", "นำ", "บาง", "ผม", "ผ่าน", "พร้อม", "เพราะ", "เพียง", "เพื่อ", "มัน", "มาก", "มี",
    "ยัง", "ยิ่ง", "รวม", "ระหว่าง", "ราย", "ร่วม", "ละ", "ว่า", "สำหรับ", "สุด", "หรือ", "หลัง",
    "หาก", "ให้", "อยู่", "อย่าง", "อีก", "อาจ", "เขา", "เคย", "เช่น", "เนื่องจาก", "เป็น", "เมื่อ",
    "เรา", "เลย", "เอง", "แก่", "แต่", "แบบ", "แม้", "แล้ว", "และ", "โดย", "ใคร", "ใน", "ได้",
    "ไป", "ไม่", "ไว้",
];

static DEFAULT_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_THAI_STOP_WORDS
        .iter()
        .chain(DEFAULT_ENGLISH_STOP_WORDS)
        .map(|&s| s.to_string())
        .collect()
});

/// Anything that can say whether a word is a stop word.
pub trait StopwordSource: Send + Sync {
    /// Whether `word` should be dropped.
    fn contains(&self, word: &str) -> bool;
}

impl StopwordSource for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}

/// A set of stop words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// An empty set.
    pub fn empty() -> Self {
        StopWords {
            words: HashSet::new(),
        }
    }

    /// A set holding exactly `words`.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopWords {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Add `words` to this set.
    pub fn with_extra<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    /// Thai and English defaults.
    fn default() -> Self {
        StopWords {
            words: DEFAULT_STOP_WORDS_SET.clone(),
        }
    }
}

impl StopwordSource for StopWords {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_both_languages() {
        let stop_words = StopWords::default();
        assert!(stop_words.contains("และ"));
        assert!(stop_words.contains("เป็น"));
        assert!(stop_words.contains("the"));
        assert!(!stop_words.contains("แมว"));
        assert_eq!(
            stop_words.len(),
            DEFAULT_THAI_STOP_WORDS.len() + DEFAULT_ENGLISH_STOP_WORDS.len()
        );
    }

    #[test]
    fn test_empty_and_custom() {
        assert!(StopWords::empty().is_empty());
        let custom = StopWords::from_words(["x"]);
        assert!(custom.contains("x"));
        assert!(!custom.contains("the"));
    }

    #[test]
    fn test_hash_set_source() {
        let set: HashSet<String> = ["คน".to_string()].into_iter().collect();
        assert!(StopwordSource::contains(&set, "คน"));
        assert!(!StopwordSource::contains(&set, "แมว"));
    }
}
