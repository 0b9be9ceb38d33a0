//! # thaifreq
//!
//! Word frequency and part-of-speech analysis for Thai and English text.
//!
//! ## Features
//!
//! - Thai-aware text normalization
//! - Pluggable word segmentation and tagging, with a built-in lexicon analyzer
//! - Part-of-speech filtering with stop word removal
//! - Running frequency totals shared safely between threads
//! - Content-addressed cache with a bounded memory tier and a durable file tier
//! - Parallel batch analysis on a bounded worker pool
//!
//! ```
//! use thaifreq::prelude::*;
//!
//! let aggregator = FrequencyAggregator::new(AnalyzerConfig::in_memory()).unwrap();
//! aggregator.analyze("แมวกินปลา แมวนอน", &AnalyzeOptions::new()).unwrap();
//! assert_eq!(aggregator.top_n(1), vec![("แมว".to_string(), 2)]);
//! ```

pub mod analysis;
pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod detector;
pub mod error;
pub mod parallel;
pub mod perf;
pub mod sink;
pub mod storage;
pub mod util;

pub mod prelude {
    pub use crate::analysis::token::{FrequencyTable, TaggedToken};
    pub use crate::analysis::tokenizer::LinguisticAnalyzer;
    pub use crate::config::AnalyzerConfig;
    pub use crate::detector::{AnalysisResult, AnalyzeOptions, FrequencyAggregator};
    pub use crate::error::{Result, ThaifreqError};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
