use regex::Regex;

use crate::error::{Result, ThaifreqError};

use super::CharFilter;

/// Characters the analyzer keeps: Thai letters, vowels and marks
/// (U+0E01..U+0E3A, U+0E40..U+0E4E), ASCII letters and whitespace.
///
/// Digits (Arabic and Thai), punctuation, symbols, the baht sign and
/// zero-width characters all fall outside this set.
const OUTSIDE_PERMITTED_SCRIPTS: &str = r"[^\x{0E01}-\x{0E3A}\x{0E40}-\x{0E4E}A-Za-z\s]";

/// A char filter that replaces characters matching a regex pattern.
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
    name: &'static str,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| ThaifreqError::Anyhow(anyhow::Error::from(e)))?,
            replacement: replacement.to_string(),
            name: "pattern_replace",
        })
    }

    /// Removes every character outside the supported scripts.
    pub fn permitted_scripts() -> Self {
        Self::builtin(OUTSIDE_PERMITTED_SCRIPTS, "", "permitted_scripts")
    }

    /// Collapses each run of whitespace into one ASCII space.
    pub fn collapse_whitespace() -> Self {
        Self::builtin(r"\s+", " ", "collapse_whitespace")
    }

    fn builtin(pattern: &str, replacement: &str, name: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("built-in pattern must compile"),
            replacement: replacement.to_string(),
            name,
        }
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"(\d+)", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
        assert_eq!(filter.name(), "pattern_replace");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternReplaceCharFilter::new(r"(unclosed", "").is_err());
    }

    #[test]
    fn test_permitted_scripts_strips_digits_and_punctuation() {
        let filter = PatternReplaceCharFilter::permitted_scripts();
        assert_eq!(filter.filter("แมว 3 ตัว!"), "แมว  ตัว");
        assert_eq!(filter.filter("ปี ๒๕๖๗ ราคา ฿100"), "ปี  ราคา ");
        assert_eq!(filter.filter("hello, world."), "hello world");
        assert_eq!(filter.filter("ก\u{200B}ข"), "กข");
        assert_eq!(filter.filter("café"), "caf");
    }

    #[test]
    fn test_permitted_scripts_keeps_thai_marks() {
        let filter = PatternReplaceCharFilter::permitted_scripts();
        assert_eq!(filter.filter("ใหม่ๆ"), "ใหม่ๆ");
        assert_eq!(filter.filter("กรุงเทพฯ"), "กรุงเทพฯ");
    }

    #[test]
    fn test_collapse_whitespace() {
        let filter = PatternReplaceCharFilter::collapse_whitespace();
        assert_eq!(filter.filter("a \n\t b   c"), "a b c");
        assert_eq!(filter.filter("\u{3000}x"), " x");
    }
}
