//! Word frequency aggregation across many texts.
//!
//! [`FrequencyAggregator`] runs each text through the pipeline
//! (normalize → tag → POS filter → count) and folds the counts into
//! running totals. It is shared between threads by reference: `analyze`
//! takes `&self`, and all accumulated state sits behind one lock so each
//! text's contribution becomes visible all at once.
//!
//! # Invariants
//!
//! - the running word table is the sum of the per-text tables in history
//! - the per-word tag tables sum to the running word table
//! - a failed `analyze` leaves every total and the history untouched
//!
//! # Examples
//!
//! ```
//! use thaifreq::config::AnalyzerConfig;
//! use thaifreq::detector::{AnalyzeOptions, FrequencyAggregator};
//!
//! let aggregator = FrequencyAggregator::new(AnalyzerConfig::in_memory()).unwrap();
//! let result = aggregator
//!     .analyze("แมวแมวแมว", &AnalyzeOptions::new().filter_pos(false))
//!     .unwrap();
//!
//! assert_eq!(result.total_words(), 3);
//! assert_eq!(result.unique_words(), 1);
//! assert_eq!(aggregator.top_n(1), vec![("แมว".to_string(), 3)]);
//! ```

pub mod record;
pub mod report;

use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::tagger::TokenTagger;
use crate::analysis::token::{DEFAULT_ACCEPTED_TAGS, FrequencyTable, TaggedToken};
use crate::analysis::token_filter::pos::PosFilter;
use crate::analysis::token_filter::stop::{StopWords, StopwordSource};
use crate::analysis::tokenizer::LinguisticAnalyzer;
use crate::analysis::tokenizer::pipeline::PipelineAnalyzer;
use crate::config::AnalyzerConfig;
use crate::context::PipelineContext;
use crate::error::Result;
use crate::parallel::{BatchFailureMode, ParallelExecutor};
use crate::perf::{OperationTimer, SystemInfo};

pub use record::{AnalysisRecord, AnalysisResult, TextSummary};
pub use report::PerformanceReport;

/// Tracker operation name of a timed `analyze` call.
pub const ANALYZE_OPERATION: &str = "analyze_text";

/// Per-call options of [`FrequencyAggregator::analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Apply POS filtering. If None, uses the configured default.
    pub filter_pos: Option<bool>,

    /// Accepted tags for POS filtering. If None, uses the configured
    /// default. An empty list accepts nothing.
    pub target_tags: Option<Vec<String>>,

    /// Record the call in the performance tracker.
    pub track_time: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            filter_pos: None,
            target_tags: None,
            track_time: true,
        }
    }
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_pos(mut self, filter_pos: bool) -> Self {
        self.filter_pos = Some(filter_pos);
        self
    }

    pub fn target_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn track_time(mut self, track_time: bool) -> Self {
        self.track_time = track_time;
        self
    }
}

/// Consistent view of the running totals, taken under a single lock.
#[derive(Debug, Clone)]
pub struct AggregateSnapshot {
    pub word_frequency: FrequencyTable,
    pub pos_distribution: AHashMap<String, FrequencyTable>,
    pub history: Vec<Arc<AnalysisRecord>>,
}

impl AggregateSnapshot {
    /// Whether the totals agree with the history they were built from.
    pub fn is_consistent(&self) -> bool {
        let mut summed = FrequencyTable::new();
        for record in &self.history {
            summed.merge(&record.word_frequency);
        }
        let tags_match = |(word, count): (&str, u64)| {
            self.pos_distribution
                .get(word)
                .is_some_and(|tags| tags.total() == count)
        };
        summed == self.word_frequency
            && self.pos_distribution.len() == self.word_frequency.len()
            && self.word_frequency.iter().all(tags_match)
    }
}

#[derive(Debug, Default)]
struct AggregateState {
    word_frequency: FrequencyTable,
    pos_distribution: AHashMap<String, FrequencyTable>,
    history: Vec<Arc<AnalysisRecord>>,
}

/// Builder for a [`FrequencyAggregator`] with non-default collaborators.
pub struct AggregatorBuilder {
    config: AnalyzerConfig,
    analyzer: Option<Arc<dyn LinguisticAnalyzer>>,
    stop_words: Option<Arc<dyn StopwordSource>>,
    context: Option<PipelineContext>,
}

impl AggregatorBuilder {
    /// Use `analyzer` instead of the built-in one.
    pub fn analyzer(mut self, analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Use `stop_words` instead of the default lists. Configured extra stop
    /// words are not added to a custom source.
    pub fn stop_words(mut self, stop_words: Arc<dyn StopwordSource>) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Share `context` instead of building one from the configuration.
    pub fn context(mut self, context: PipelineContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn build(self) -> Result<FrequencyAggregator> {
        let config = self.config;
        config.validate()?;

        let context = self
            .context
            .unwrap_or_else(|| PipelineContext::from_config(&config));
        let analyzer = self.analyzer.unwrap_or_else(|| {
            Arc::new(PipelineAnalyzer::builtin()) as Arc<dyn LinguisticAnalyzer>
        });
        let stop_words = self.stop_words.unwrap_or_else(|| {
            let defaults = StopWords::default().with_extra(config.extra_stopwords.iter().cloned());
            Arc::new(defaults) as Arc<dyn StopwordSource>
        });

        let mut normalizer = TextNormalizer::new();
        let mut tagger = TokenTagger::new(analyzer).with_timeout(config.tagger_timeout());
        if let Some(cache) = context.cache() {
            normalizer = normalizer.with_cache(Arc::clone(cache));
            tagger = tagger.with_cache(Arc::clone(cache));
        }

        let accepted = config
            .default_target_tags
            .clone()
            .unwrap_or_else(|| DEFAULT_ACCEPTED_TAGS.iter().map(|t| t.to_string()).collect());
        let pos_filter = PosFilter::new(accepted, stop_words);

        debug!("built aggregator with {tagger:?}");
        Ok(FrequencyAggregator {
            config,
            context,
            normalizer,
            tagger,
            pos_filter,
            executor: Mutex::new(None),
            state: Mutex::new(AggregateState::default()),
        })
    }
}

/// Accumulates word and tag frequencies over every analyzed text.
pub struct FrequencyAggregator {
    config: AnalyzerConfig,
    context: PipelineContext,
    normalizer: TextNormalizer,
    tagger: TokenTagger,
    pos_filter: PosFilter,
    executor: Mutex<Option<Arc<ParallelExecutor>>>,
    state: Mutex<AggregateState>,
}

impl FrequencyAggregator {
    /// Create an aggregator with the built-in analyzer and default stop words.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: AnalyzerConfig) -> AggregatorBuilder {
        AggregatorBuilder {
            config,
            analyzer: None,
            stop_words: None,
            context: None,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// Analyze one text and fold its counts into the running totals.
    ///
    /// Empty or fully stripped text succeeds with zero counts and is still
    /// appended to history. A tagging failure is returned as is and leaves
    /// all state untouched.
    pub fn analyze(&self, text: &str, options: &AnalyzeOptions) -> Result<AnalysisResult> {
        let tracker = self.context.tracker();
        let tracked = options.track_time && self.config.enable_performance_tracking;
        let timer = OperationTimer::start();
        if tracked {
            tracker.start(ANALYZE_OPERATION);
        }

        let (cleaned, filtered) = match self.run_pipeline(text, options) {
            Ok(output) => output,
            Err(e) => {
                if tracked {
                    tracker.cancel(ANALYZE_OPERATION);
                }
                return Err(e);
            }
        };

        let record = Arc::new(AnalysisRecord::new(text, cleaned, filtered));
        self.commit(&record);

        let processing_time = match (options.track_time, tracked) {
            (false, _) => None,
            (true, true) => tracker
                .end(ANALYZE_OPERATION)
                .or_else(|| Some(timer.elapsed())),
            (true, false) => Some(timer.stop()),
        };

        Ok(AnalysisResult {
            record,
            processing_time,
        })
    }

    fn run_pipeline(
        &self,
        text: &str,
        options: &AnalyzeOptions,
    ) -> Result<(String, Vec<TaggedToken>)> {
        let cleaned = self.normalizer.normalize(text);
        let tagged = self.tagger.tokenize_and_tag(&cleaned)?;

        let filter_pos = options.filter_pos.unwrap_or(self.config.default_filter_pos);
        let filtered = if !filter_pos {
            tagged
        } else if let Some(tags) = &options.target_tags {
            self.pos_filter.filter_with(&tagged, tags.as_slice())
        } else {
            self.pos_filter.filter_with(&tagged, self.pos_filter.accepted())
        };

        Ok((cleaned, filtered))
    }

    fn commit(&self, record: &Arc<AnalysisRecord>) {
        let mut state = self.state.lock();
        state.word_frequency.merge(&record.word_frequency);
        for token in &record.filtered_words {
            state
                .pos_distribution
                .entry(token.word.clone())
                .or_default()
                .add(&token.tag, 1);
        }
        state.history.push(Arc::clone(record));
    }

    /// The `n` most frequent words so far, descending; ties keep the order
    /// in which words were first counted.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        self.state.lock().word_frequency.most_common(n)
    }

    /// Tag counts recorded for `word`; empty when the word was never counted.
    pub fn pos_distribution(&self, word: &str) -> FrequencyTable {
        self.state
            .lock()
            .pos_distribution
            .get(word)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the running word table.
    pub fn word_frequency(&self) -> FrequencyTable {
        self.state.lock().word_frequency.clone()
    }

    /// Totals and history as of one instant.
    pub fn snapshot(&self) -> AggregateSnapshot {
        let state = self.state.lock();
        AggregateSnapshot {
            word_frequency: state.word_frequency.clone(),
            pos_distribution: state.pos_distribution.clone(),
            history: state.history.clone(),
        }
    }

    /// Every record so far, oldest first.
    pub fn history(&self) -> Vec<Arc<AnalysisRecord>> {
        self.state.lock().history.clone()
    }

    pub fn total_texts_processed(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Per-text summary rows, numbered from 1.
    pub fn history_summaries(&self) -> Vec<TextSummary> {
        self.state
            .lock()
            .history
            .iter()
            .enumerate()
            .map(|(i, record)| TextSummary::of(i + 1, record))
            .collect()
    }

    /// Forget all totals, history and timings, and empty the cache.
    ///
    /// A failure to clear the durable cache tier is logged, not returned.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.word_frequency.clear();
        state.pos_distribution.clear();
        state.history.clear();

        self.context.tracker().reset();
        if let Some(cache) = self.context.cache() {
            if let Err(e) = cache.clear() {
                warn!("reset could not clear the durable cache: {e}");
            }
        }
        info!("aggregator reset");
    }

    /// Empty both cache tiers, leaving totals and history alone.
    pub fn clear_cache(&self) -> Result<()> {
        match self.context.cache() {
            Some(cache) => cache.clear(),
            None => Ok(()),
        }
    }

    /// Timing, cache and volume statistics.
    pub fn performance_stats(&self) -> PerformanceReport {
        let (total_texts_processed, total_words_processed) = {
            let state = self.state.lock();
            (
                state.history.len(),
                state.history.iter().map(|r| r.total_words).sum(),
            )
        };
        let tracker = self.context.tracker();

        PerformanceReport {
            operations: tracker.stats(),
            cache: self.context.cache().map(|cache| cache.stats()),
            total_texts_processed,
            total_words_processed,
            average_processing_time: tracker.average(ANALYZE_OPERATION),
            system: SystemInfo::collect(),
        }
    }

    fn executor(&self) -> Result<Arc<ParallelExecutor>> {
        let mut slot = self.executor.lock();
        if let Some(executor) = slot.as_ref() {
            return Ok(Arc::clone(executor));
        }
        let executor = Arc::new(ParallelExecutor::new(self.config.max_workers)?);
        *slot = Some(Arc::clone(&executor));
        Ok(executor)
    }

    /// Analyze every text, failing with the first error in input order.
    ///
    /// Items are not timed individually. Sequential batches stop at the
    /// first failure; parallel batches run every item, so texts that
    /// succeeded are counted even when the batch fails.
    pub fn analyze_batch<S>(
        &self,
        texts: &[S],
        options: &AnalyzeOptions,
        parallel: bool,
    ) -> Result<Vec<AnalysisResult>>
    where
        S: AsRef<str> + Sync,
    {
        self.analyze_batch_with(texts, options, parallel, BatchFailureMode::FailFast)?
            .into_iter()
            .collect()
    }

    /// Analyze every text, capturing each outcome separately.
    pub fn analyze_batch_lenient<S>(
        &self,
        texts: &[S],
        options: &AnalyzeOptions,
        parallel: bool,
    ) -> Result<Vec<Result<AnalysisResult>>>
    where
        S: AsRef<str> + Sync,
    {
        self.analyze_batch_with(texts, options, parallel, BatchFailureMode::Collect)
    }

    /// Analyze every text, reporting failures per `mode`.
    ///
    /// Results follow input order. A batch of one, or `parallel == false`,
    /// runs on the calling thread.
    pub fn analyze_batch_with<S>(
        &self,
        texts: &[S],
        options: &AnalyzeOptions,
        parallel: bool,
        mode: BatchFailureMode,
    ) -> Result<Vec<Result<AnalysisResult>>>
    where
        S: AsRef<str> + Sync,
    {
        let item_options = AnalyzeOptions {
            track_time: false,
            ..options.clone()
        };
        let timer = OperationTimer::start();
        let parallel = parallel && texts.len() > 1;
        info!(
            "analyzing batch of {} texts ({})",
            texts.len(),
            if parallel { "parallel" } else { "sequential" }
        );

        let results = if parallel {
            let executor = self.executor()?;
            executor.try_map_parallel(texts, mode, |text| {
                self.analyze(text.as_ref(), &item_options)
            })
        } else {
            let analyze = |text: &S| self.analyze(text.as_ref(), &item_options);
            match mode {
                BatchFailureMode::Collect => Ok(texts.iter().map(analyze).collect()),
                BatchFailureMode::FailFast => texts
                    .iter()
                    .map(analyze)
                    .collect::<Result<Vec<_>>>()
                    .map(|values| values.into_iter().map(Ok).collect()),
            }
        };

        match &results {
            Ok(items) => info!(
                "batch of {} texts finished in {:?} ({} failed)",
                texts.len(),
                timer.elapsed(),
                items.iter().filter(|r| r.is_err()).count()
            ),
            Err(e) => warn!("batch of {} texts failed: {e}", texts.len()),
        }
        results
    }
}

impl std::fmt::Debug for FrequencyAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyAggregator")
            .field("tagger", &self.tagger)
            .field("pos_filter", &self.pos_filter)
            .field("texts", &self.total_texts_processed())
            .finish()
    }
}
