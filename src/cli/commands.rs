//! Command implementations for the thaifreq CLI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AnalyzerConfig;
use crate::detector::{AnalysisResult, AnalyzeOptions, FrequencyAggregator};
use crate::error::{Result, ThaifreqError};
use crate::parallel::BatchFailureMode;
use crate::sink::{JsonLinesSink, ResultPayload, ResultSink};
use crate::storage::{DurableCacheStore, FileStore};

/// Number of words listed per text in the analyze report.
const WORDS_PER_TEXT: usize = 5;

/// Execute a CLI command.
pub fn execute_command(args: ThaifreqArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args.clone(), config, &args),
        Command::Stats(_) => show_stats(&config, &args),
        Command::ClearCache(_) => clear_cache(&config, &args),
    }
}

/// Read the configuration file, if any, and apply command line overrides.
fn load_config(args: &ThaifreqArgs) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            AnalyzerConfig::from_json_file(path)?
        }
        None => AnalyzerConfig::default(),
    };
    if let Some(dir) = &args.cache_dir {
        config = config.with_cache_dir(dir.clone());
    }
    Ok(config)
}

/// A text to analyze and where it came from.
struct Input {
    source: String,
    text: String,
}

fn collect_inputs(args: &AnalyzeArgs) -> Result<Vec<Input>> {
    let mut inputs: Vec<Input> = args
        .texts
        .iter()
        .enumerate()
        .map(|(i, text)| Input {
            source: format!("argument {}", i + 1),
            text: text.clone(),
        })
        .collect();

    for path in &args.inputs {
        let text = fs::read_to_string(path).map_err(|e| {
            ThaifreqError::invalid_input(format!("Cannot read {}: {e}", path.display()))
        })?;
        inputs.push(Input {
            source: path.display().to_string(),
            text,
        });
    }

    if inputs.is_empty() {
        return Err(ThaifreqError::invalid_input(
            "Nothing to analyze: pass texts or --input files",
        ));
    }
    Ok(inputs)
}

/// Analyze texts.
fn analyze(args: AnalyzeArgs, mut config: AnalyzerConfig, cli_args: &ThaifreqArgs) -> Result<()> {
    if args.no_cache {
        config.enable_cache = false;
    }
    if args.keep_going {
        config.batch_failure_mode = BatchFailureMode::Collect;
    }

    let inputs = collect_inputs(&args)?;
    let aggregator = FrequencyAggregator::new(config)?;

    let mut options = AnalyzeOptions::new();
    if args.no_filter_pos {
        options = options.filter_pos(false);
    }
    if !args.tags.is_empty() {
        options = options.target_tags(args.tags.iter().cloned());
    }

    let mode = aggregator.config().batch_failure_mode;
    let start_time = Instant::now();
    let outcomes: Vec<Result<AnalysisResult>> = if inputs.len() == 1 {
        let outcome = aggregator.analyze(&inputs[0].text, &options);
        match mode {
            BatchFailureMode::FailFast => vec![Ok(outcome?)],
            BatchFailureMode::Collect => vec![outcome],
        }
    } else {
        let texts: Vec<&str> = inputs.iter().map(|input| input.text.as_str()).collect();
        aggregator.analyze_batch_with(&texts, &options, args.parallel, mode)?
    };
    let duration = start_time.elapsed();

    if let Some(path) = &args.save_jsonl {
        save_results(path, &inputs, &outcomes, args.title.as_deref())?;
    }

    let texts: Vec<TextReport> = inputs
        .iter()
        .zip(&outcomes)
        .enumerate()
        .map(|(i, (input, outcome))| match outcome {
            Ok(result) => TextReport {
                index: i + 1,
                source: input.source.clone(),
                total_words: result.total_words(),
                unique_words: result.unique_words(),
                top_words: result.word_frequency().most_common(WORDS_PER_TEXT),
                processing_time_ms: result
                    .processing_time
                    .map(|d| d.as_secs_f64() * 1000.0),
                error: None,
            },
            Err(e) => TextReport {
                index: i + 1,
                source: input.source.clone(),
                total_words: 0,
                unique_words: 0,
                top_words: Vec::new(),
                processing_time_ms: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let stats = aggregator.performance_stats();
    let report = AnalyzeReport {
        failed_texts: texts.iter().filter(|t| t.error.is_some()).count(),
        texts,
        top_words: aggregator.top_n(args.top),
        total_texts: stats.total_texts_processed,
        total_words: stats.total_words_processed,
        duration_ms: duration.as_millis() as u64,
        cache_hit_rate: stats.cache.map(|c| c.hit_rate),
    };

    output_result("Analysis complete", &report, cli_args)
}

fn save_results(
    path: &Path,
    inputs: &[Input],
    outcomes: &[Result<AnalysisResult>],
    title: Option<&str>,
) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut sink = JsonLinesSink::new(file);

    for (input, outcome) in inputs.iter().zip(outcomes) {
        if let Ok(result) = outcome {
            let title = title.unwrap_or(input.source.as_str());
            let payload = ResultPayload::from_record(&result.record, title, &input.source);
            sink.save(&payload)?;
        }
    }
    sink.flush()?;
    info!("saved {} results to {}", sink.written(), path.display());
    Ok(())
}

fn open_cache_dir(config: &AnalyzerConfig) -> Result<FileStore> {
    FileStore::new(&config.cache_dir)
}

/// Show durable cache statistics.
fn show_stats(config: &AnalyzerConfig, cli_args: &ThaifreqArgs) -> Result<()> {
    let store = open_cache_dir(config)?;
    let stats = CacheDirStats {
        directory: store.directory().display().to_string(),
        entries: store.entry_count()?,
        total_size_bytes: store.total_size()?,
    };
    output_result("Cache statistics", &stats, cli_args)
}

/// Delete every durable cache entry.
fn clear_cache(config: &AnalyzerConfig, cli_args: &ThaifreqArgs) -> Result<()> {
    let store = open_cache_dir(config)?;
    let entries_removed = store.entry_count()?;
    store.delete_all()?;

    let result = ClearCacheResult {
        directory: store.directory().display().to_string(),
        entries_removed,
    };
    output_result("Cache cleared", &result, cli_args)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn parse(args: &[&str]) -> ThaifreqArgs {
        ThaifreqArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_analyze_and_save() {
        let dir = TempDir::new().unwrap();
        let cache_dir = dir.path().join("cache");
        let out = dir.path().join("results.jsonl");

        let args = parse(&[
            "thaifreq",
            "-q",
            "--cache-dir",
            cache_dir.to_str().unwrap(),
            "analyze",
            "แมวกินปลา",
            "แมวนอน",
            "--save-jsonl",
            out.to_str().unwrap(),
        ]);
        execute_command(args).unwrap();

        let saved = fs::read_to_string(&out).unwrap();
        assert_eq!(saved.lines().count(), 2);

        let args = parse(&["thaifreq", "-q", "--cache-dir", cache_dir.to_str().unwrap(), "stats"]);
        execute_command(args).unwrap();
        let store = FileStore::new(&cache_dir).unwrap();
        assert!(store.entry_count().unwrap() > 0);

        let args = parse(&[
            "thaifreq",
            "-q",
            "--cache-dir",
            cache_dir.to_str().unwrap(),
            "clear-cache",
        ]);
        execute_command(args).unwrap();
        assert_eq!(store.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_analyze_without_input() {
        let args = parse(&["thaifreq", "-q", "analyze", "--no-cache"]);
        let err = execute_command(args).unwrap_err();
        assert!(matches!(err, ThaifreqError::InvalidInput(_)));
    }

    #[test]
    fn test_analyze_input_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("text.txt");
        fs::write(&file, "ภาษาไทยเป็นภาษาที่สวยงาม").unwrap();

        let args = parse(&[
            "thaifreq",
            "-q",
            "--format",
            "json",
            "analyze",
            "--no-cache",
            "-i",
            file.to_str().unwrap(),
        ]);
        execute_command(args).unwrap();
    }
}
