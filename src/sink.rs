//! Hand-off of analysis results to outside storage.
//!
//! A [`ResultPayload`] is the serializable view of one analyzed text: word
//! counts with their share of the total, tag counts, and the caller's
//! title and source labels. A [`ResultSink`] accepts payloads;
//! [`JsonLinesSink`] writes each one as a JSON object on its own line.
//!
//! # Examples
//!
//! ```
//! use thaifreq::config::AnalyzerConfig;
//! use thaifreq::detector::{AnalyzeOptions, FrequencyAggregator};
//! use thaifreq::sink::{JsonLinesSink, ResultPayload, ResultSink};
//!
//! let aggregator = FrequencyAggregator::new(AnalyzerConfig::in_memory()).unwrap();
//! let result = aggregator.analyze("แมวกินปลา", &AnalyzeOptions::new()).unwrap();
//!
//! let mut sink = JsonLinesSink::new(Vec::new());
//! sink.save(&ResultPayload::from_record(&result.record, "demo", "inline")).unwrap();
//!
//! let written = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(written.lines().count(), 1);
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detector::AnalysisRecord;
use crate::error::Result;

/// One word of a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub frequency: u64,

    /// Share of the text's counted words, in percent.
    pub percentage: f64,
}

/// Serializable summary of one analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub title: String,
    pub source: String,
    pub total_words: usize,
    pub unique_words: usize,

    /// Words by descending frequency.
    pub word_frequency: Vec<WordEntry>,

    /// Tags by descending frequency.
    pub pos_frequency: Vec<(String, u64)>,

    pub analyzed_at: DateTime<Utc>,
}

impl ResultPayload {
    /// Build a payload from a history record.
    pub fn from_record(record: &AnalysisRecord, title: &str, source: &str) -> Self {
        let total = record.total_words;
        let word_frequency = record
            .word_frequency
            .most_common(record.word_frequency.len())
            .into_iter()
            .map(|(word, frequency)| WordEntry {
                percentage: if total > 0 {
                    frequency as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
                word,
                frequency,
            })
            .collect();

        ResultPayload {
            title: title.to_string(),
            source: source.to_string(),
            total_words: record.total_words,
            unique_words: record.unique_words,
            word_frequency,
            pos_frequency: record
                .pos_frequency
                .most_common(record.pos_frequency.len()),
            analyzed_at: record.analyzed_at,
        }
    }
}

/// Destination for analysis results.
pub trait ResultSink {
    fn save(&mut self, payload: &ResultPayload) -> Result<()>;

    /// Push buffered payloads to the destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON object per payload, newline separated.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer, written: 0 }
    }

    /// Number of payloads written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for JsonLinesSink<W> {
    fn save(&mut self, payload: &ResultPayload) -> Result<()> {
        serde_json::to_writer(&mut self.writer, payload)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
