//! Per-text analysis outcomes.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::token::{FrequencyTable, TaggedToken};

/// Everything one `analyze` call produced. Immutable once appended to the
/// aggregator's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub original_text: String,
    pub cleaned_text: String,

    /// Number of tokens that survived filtering.
    pub total_words: usize,

    /// Number of distinct words among them.
    pub unique_words: usize,

    pub word_frequency: FrequencyTable,
    pub pos_frequency: FrequencyTable,

    /// The counted tokens, in reading order.
    pub filtered_words: Vec<TaggedToken>,

    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub(crate) fn new(
        original_text: &str,
        cleaned_text: String,
        filtered: Vec<TaggedToken>,
    ) -> Self {
        let word_frequency = FrequencyTable::from_words(filtered.iter().map(|t| t.word.as_str()));
        let pos_frequency = FrequencyTable::from_words(filtered.iter().map(|t| t.tag.as_str()));

        AnalysisRecord {
            original_text: original_text.to_string(),
            cleaned_text,
            total_words: filtered.len(),
            unique_words: word_frequency.len(),
            word_frequency,
            pos_frequency,
            filtered_words: filtered,
            analyzed_at: Utc::now(),
        }
    }

    /// The most frequent word and its count.
    pub fn most_frequent(&self) -> Option<(String, u64)> {
        self.word_frequency.most_common(1).into_iter().next()
    }
}

/// Result of [`FrequencyAggregator::analyze`](super::FrequencyAggregator::analyze).
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The record appended to history.
    pub record: Arc<AnalysisRecord>,

    /// Wall time of the call; `None` when timing was not requested.
    pub processing_time: Option<Duration>,
}

impl AnalysisResult {
    pub fn word_frequency(&self) -> &FrequencyTable {
        &self.record.word_frequency
    }

    pub fn pos_frequency(&self) -> &FrequencyTable {
        &self.record.pos_frequency
    }

    pub fn total_words(&self) -> usize {
        self.record.total_words
    }

    pub fn unique_words(&self) -> usize {
        self.record.unique_words
    }

    pub fn filtered_words(&self) -> &[TaggedToken] {
        &self.record.filtered_words
    }
}

/// One row of [`FrequencyAggregator::history_summaries`](super::FrequencyAggregator::history_summaries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSummary {
    /// 1-based position in history.
    pub index: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub most_frequent_word: Option<String>,
    pub max_frequency: u64,
}

impl TextSummary {
    pub(crate) fn of(index: usize, record: &AnalysisRecord) -> Self {
        let (most_frequent_word, max_frequency) = match record.most_frequent() {
            Some((word, count)) => (Some(word), count),
            None => (None, 0),
        };
        TextSummary {
            index,
            total_words: record.total_words,
            unique_words: record.unique_words,
            most_frequent_word,
            max_frequency,
        }
    }
}
