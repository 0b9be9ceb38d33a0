//! Longest-match dictionary segmentation.
//!
//! Text is first split into runs by script. Latin runs become words as they
//! are, whitespace is dropped, and Thai runs are cut by greedy longest
//! matching against the lexicon. Characters no entry covers are gathered
//! into a single unknown word until the next match.

use ahash::AHashSet;

use crate::analysis::char_filter::thai::is_thai_combining_mark;
use crate::error::Result;

use super::Segmenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Thai,
    Latin,
    Space,
    Other,
}

fn script_of(c: char) -> Script {
    match c {
        '\u{0E00}'..='\u{0E7F}' => Script::Thai,
        c if c.is_ascii_alphabetic() => Script::Latin,
        c if c.is_whitespace() => Script::Space,
        _ => Script::Other,
    }
}

/// Thai vowels written before the consonant they follow in speech.
fn is_leading_vowel(c: char) -> bool {
    matches!(c, '\u{0E40}'..='\u{0E44}')
}

/// Segmenter cutting Thai runs by longest dictionary match.
#[derive(Debug, Clone)]
pub struct DictionarySegmenter {
    words: AHashSet<String>,
    max_word_chars: usize,
}

impl DictionarySegmenter {
    /// Create a segmenter over the given words. Empty entries are ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: AHashSet<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !w.is_empty())
            .collect();
        let max_word_chars = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);

        DictionarySegmenter {
            words,
            max_word_chars,
        }
    }

    /// Number of dictionary entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` is a dictionary entry.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Length in chars of the longest entry matching `chars[start..]`.
    ///
    /// A match may not end on a leading vowel, nor be followed by a
    /// combining mark, since either would split a syllable.
    fn longest_match(&self, chars: &[char], start: usize) -> Option<usize> {
        let remaining = chars.len() - start;
        let longest = self.max_word_chars.min(remaining);

        let mut candidate = String::new();
        let mut best = None;
        for len in 1..=longest {
            candidate.push(chars[start + len - 1]);
            if !self.words.contains(&candidate) {
                continue;
            }
            if is_leading_vowel(chars[start + len - 1]) {
                continue;
            }
            if chars
                .get(start + len)
                .is_some_and(|&next| is_thai_combining_mark(next))
            {
                continue;
            }
            best = Some(len);
        }
        best
    }

    fn segment_thai(&self, run: &[char], out: &mut Vec<String>) {
        let mut unknown = String::new();
        let mut pos = 0;

        while pos < run.len() {
            match self.longest_match(run, pos) {
                Some(len) => {
                    if !unknown.is_empty() {
                        out.push(std::mem::take(&mut unknown));
                    }
                    out.push(run[pos..pos + len].iter().collect());
                    pos += len;
                }
                None => {
                    unknown.push(run[pos]);
                    pos += 1;
                }
            }
        }

        if !unknown.is_empty() {
            out.push(unknown);
        }
    }
}

impl Segmenter for DictionarySegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        let chars: Vec<char> = text.chars().collect();
        let mut words = Vec::new();

        let mut start = 0;
        while start < chars.len() {
            let script = script_of(chars[start]);
            let end = chars[start..]
                .iter()
                .position(|&c| script_of(c) != script)
                .map_or(chars.len(), |offset| start + offset);

            let run = &chars[start..end];
            match script {
                Script::Thai => self.segment_thai(run, &mut words),
                Script::Latin | Script::Other => words.push(run.iter().collect()),
                Script::Space => {}
            }
            start = end;
        }

        Ok(words)
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
