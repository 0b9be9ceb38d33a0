//! Durable cache behavior across aggregators sharing a directory.

use tempfile::TempDir;

use thaifreq::config::AnalyzerConfig;
use thaifreq::detector::{AnalyzeOptions, FrequencyAggregator};
use thaifreq::error::Result;
use thaifreq::storage::{DurableCacheStore, FileStore};

fn durable_config(dir: &TempDir) -> AnalyzerConfig {
    AnalyzerConfig::in_memory().with_cache_dir(dir.path().join("cache"))
}

#[test]
fn test_second_aggregator_reads_durable_entries() -> Result<()> {
    let dir = TempDir::new().unwrap();

    let first = FrequencyAggregator::new(durable_config(&dir))?;
    let expected = first.analyze("ภาษาไทยเป็นภาษาที่สวยงาม", &AnalyzeOptions::new())?;

    let store = FileStore::new(dir.path().join("cache"))?;
    // one normalized text and one tagged sequence
    assert_eq!(store.entry_count()?, 2);

    let second = FrequencyAggregator::new(durable_config(&dir))?;
    let result = second.analyze("ภาษาไทยเป็นภาษาที่สวยงาม", &AnalyzeOptions::new())?;
    assert_eq!(result.word_frequency(), expected.word_frequency());

    let stats = second.performance_stats().cache.unwrap();
    assert_eq!(stats.durable_hits, 2);
    assert_eq!(stats.misses, 0);

    Ok(())
}

#[test]
fn test_reset_empties_durable_tier() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let aggregator = FrequencyAggregator::new(durable_config(&dir))?;
    aggregator.analyze("แมวกินปลา", &AnalyzeOptions::new())?;

    let store = FileStore::new(dir.path().join("cache"))?;
    assert!(store.entry_count()? > 0);

    aggregator.reset();
    assert_eq!(store.entry_count()?, 0);

    Ok(())
}

#[test]
fn test_durable_cache_disabled() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let config = AnalyzerConfig {
        durable_cache: false,
        ..durable_config(&dir)
    };
    let aggregator = FrequencyAggregator::new(config)?;
    aggregator.analyze("แมวกินปลา", &AnalyzeOptions::new())?;

    let cache_dir = dir.path().join("cache");
    assert!(!cache_dir.exists() || FileStore::new(&cache_dir)?.entry_count()? == 0);

    Ok(())
}
