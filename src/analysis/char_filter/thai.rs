//! Thai orthographic normalization.
//!
//! Typing errors in Thai often produce strings that render identically but
//! compare differently. This filter folds the common ones:
//!
//! - a vowel or tone mark typed twice in a row keeps one copy
//! - NIKHAHIT followed by SARA AA becomes SARA AM
//! - two SARA E become SARA AE
//! - combining marks with no base character at the start of the text are dropped
//!
//! It expects NFC input, so marks are already in canonical order.

use super::CharFilter;

const NIKHAHIT: char = '\u{0E4D}';
const SARA_AA: char = '\u{0E32}';
const SARA_AM: char = '\u{0E33}';
const SARA_E: char = '\u{0E40}';
const SARA_AE: char = '\u{0E41}';

/// Whether `c` is a Thai above/below vowel, tone mark or diacritic that
/// attaches to a preceding consonant.
pub fn is_thai_combining_mark(c: char) -> bool {
    matches!(c, '\u{0E31}' | '\u{0E34}'..='\u{0E3A}' | '\u{0E47}'..='\u{0E4E}')
}

/// Char filter applying Thai orthographic clean-up rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThaiNormalizationCharFilter;

impl ThaiNormalizationCharFilter {
    pub fn new() -> Self {
        ThaiNormalizationCharFilter
    }
}

impl CharFilter for ThaiNormalizationCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut deduped: Vec<char> = Vec::with_capacity(input.len());
        for c in input.chars() {
            if is_thai_combining_mark(c) && deduped.last() == Some(&c) {
                continue;
            }
            deduped.push(c);
        }

        let mut output = String::with_capacity(input.len());
        let mut chars = deduped.into_iter().peekable();
        while let Some(c) = chars.next() {
            match (c, chars.peek()) {
                (NIKHAHIT, Some(&SARA_AA)) => {
                    chars.next();
                    output.push(SARA_AM);
                }
                (SARA_E, Some(&SARA_E)) => {
                    chars.next();
                    output.push(SARA_AE);
                }
                _ => output.push(c),
            }
        }

        output
            .trim_start_matches(|c: char| c.is_whitespace() || is_thai_combining_mark(c))
            .to_string()
    }

    fn name(&self) -> &'static str {
        "thai_normalization"
    }
}
