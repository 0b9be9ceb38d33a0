//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, ThaifreqArgs};
use crate::error::Result;

/// Results that know how to print themselves for people.
pub trait HumanReadable {
    fn render_human(&self) -> String;
}

/// Per-text line of an analysis report.
#[derive(Debug, Serialize, Deserialize)]
pub struct TextReport {
    pub index: usize,
    pub source: String,
    pub total_words: usize,
    pub unique_words: usize,
    pub top_words: Vec<(String, u64)>,
    pub processing_time_ms: Option<f64>,
    pub error: Option<String>,
}

/// Result structure for the analyze command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeReport {
    pub texts: Vec<TextReport>,
    pub top_words: Vec<(String, u64)>,
    pub total_texts: usize,
    pub total_words: usize,
    pub failed_texts: usize,
    pub duration_ms: u64,
    pub cache_hit_rate: Option<f64>,
}

/// Durable cache directory statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheDirStats {
    pub directory: String,
    pub entries: usize,
    pub total_size_bytes: u64,
}

/// Result structure for clear-cache.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearCacheResult {
    pub directory: String,
    pub entries_removed: usize,
}

impl HumanReadable for AnalyzeReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for text in &self.texts {
            let _ = writeln!(out, "[{}] {}", text.index, text.source);
            if let Some(error) = &text.error {
                let _ = writeln!(out, "  error: {error}");
                continue;
            }
            let _ = writeln!(
                out,
                "  words: {}  unique: {}",
                text.total_words, text.unique_words
            );
            if let Some(ms) = text.processing_time_ms {
                let _ = writeln!(out, "  time: {ms:.2} ms");
            }
            for (word, count) in &text.top_words {
                let _ = writeln!(out, "    {word:<20} {count:>6}");
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Texts: {} ({} failed)  Words: {}  Time: {} ms",
            self.total_texts, self.failed_texts, self.total_words, self.duration_ms
        );
        if let Some(rate) = self.cache_hit_rate {
            let _ = writeln!(out, "Cache hit rate: {:.1}%", rate * 100.0);
        }
        let _ = writeln!(out, "Most frequent words:");
        for (rank, (word, count)) in self.top_words.iter().enumerate() {
            let _ = writeln!(out, "  {:>3}. {word:<20} {count:>6}", rank + 1);
        }
        out
    }
}

impl HumanReadable for CacheDirStats {
    fn render_human(&self) -> String {
        format!(
            "Directory: {}\nEntries: {}\nSize: {}\n",
            self.directory,
            self.entries,
            format_bytes(self.total_size_bytes)
        )
    }
}

impl HumanReadable for ClearCacheResult {
    fn render_human(&self) -> String {
        format!(
            "Removed {} entries from {}\n",
            self.entries_removed, self.directory
        )
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &ThaifreqArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            print!("{}", result.render_human());
        }
        OutputFormat::Json => println!("{}", render_json(result, args.pretty)?),
    }
    Ok(())
}

/// Serialize `result` as compact or pretty JSON.
pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

/// Format bytes in human-readable format.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn test_analyze_report_human() {
        let report = AnalyzeReport {
            texts: vec![
                TextReport {
                    index: 1,
                    source: "argument 1".to_string(),
                    total_words: 3,
                    unique_words: 1,
                    top_words: vec![("แมว".to_string(), 3)],
                    processing_time_ms: None,
                    error: None,
                },
                TextReport {
                    index: 2,
                    source: "argument 2".to_string(),
                    total_words: 0,
                    unique_words: 0,
                    top_words: Vec::new(),
                    processing_time_ms: None,
                    error: Some("Tagging failure: boom".to_string()),
                },
            ],
            top_words: vec![("แมว".to_string(), 3)],
            total_texts: 2,
            total_words: 3,
            failed_texts: 1,
            duration_ms: 5,
            cache_hit_rate: Some(0.5),
        };

        let rendered = report.render_human();
        assert!(rendered.contains("[1] argument 1"));
        assert!(rendered.contains("error: Tagging failure: boom"));
        assert!(rendered.contains("Cache hit rate: 50.0%"));
        assert!(rendered.contains("1. แมว"));
    }

    #[test]
    fn test_render_json() {
        let stats = CacheDirStats {
            directory: "cache".to_string(),
            entries: 2,
            total_size_bytes: 10,
        };
        let json = render_json(&stats, false).unwrap();
        assert_eq!(
            json,
            r#"{"directory":"cache","entries":2,"total_size_bytes":10}"#
        );
    }
}
