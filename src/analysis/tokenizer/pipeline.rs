//! A segmenter followed by a tagger.

use std::fmt;

use crate::analysis::token::TaggedToken;
use crate::cache::Fingerprint;
use crate::error::{Result, ThaifreqError};

use super::dictionary::DictionarySegmenter;
use super::lexicon::{BUILTIN_THAI_LEXICON, LexiconTagger};
use super::{LinguisticAnalyzer, Segmenter, Tagger};

/// [`LinguisticAnalyzer`] composed of a [`Segmenter`] and a [`Tagger`].
pub struct PipelineAnalyzer {
    segmenter: Box<dyn Segmenter>,
    tagger: Box<dyn Tagger>,
    label: String,
}

impl PipelineAnalyzer {
    /// Compose `segmenter` and `tagger`.
    ///
    /// Analyzers sharing a cache must carry distinct labels when their
    /// components differ; see [`with_label`](Self::with_label).
    pub fn new(segmenter: Box<dyn Segmenter>, tagger: Box<dyn Tagger>) -> Self {
        PipelineAnalyzer {
            segmenter,
            tagger,
            label: "custom".to_string(),
        }
    }

    /// Analyzer over a `(word, tag)` lexicon: dictionary segmentation on
    /// the lexicon's words, tags looked up from it.
    pub fn from_lexicon<I, W, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, T)>,
        W: Into<String>,
        T: Into<String>,
    {
        let mut pairs: Vec<(String, String)> = entries
            .into_iter()
            .map(|(w, t)| (w.into(), t.into()))
            .collect();
        pairs.sort();

        let flat: Vec<&str> = pairs
            .iter()
            .flat_map(|(w, t)| [w.as_str(), t.as_str()])
            .collect();
        let digest = Fingerprint::of_parts(&flat).to_hex();

        let tagger = LexiconTagger::new(pairs.iter().map(|(w, t)| (w.as_str(), t.as_str())));
        let segmenter = DictionarySegmenter::new(pairs.into_iter().map(|(w, _)| w));

        Self::new(Box::new(segmenter), Box::new(tagger))
            .with_label(format!("lexicon-{}", &digest[..16]))
    }

    /// The analyzer used when no other is configured.
    pub fn builtin() -> Self {
        Self::from_lexicon(BUILTIN_THAI_LEXICON.iter().copied())
    }

    /// Set the label that distinguishes this analyzer in cache keys.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }
}

impl LinguisticAnalyzer for PipelineAnalyzer {
    fn segment_and_tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let words = self.segmenter.segment(text)?;
        let tokens = self.tagger.tag(&words)?;
        if tokens.len() != words.len() {
            return Err(ThaifreqError::tagging(format!(
                "{} returned {} tags for {} words",
                self.tagger.name(),
                tokens.len(),
                words.len()
            )));
        }
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn identity(&self) -> String {
        format!(
            "{}/{}+{}/{}",
            self.name(),
            self.segmenter.name(),
            self.tagger.name(),
            self.label
        )
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("identity", &self.identity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ShortTagger;

    impl Tagger for ShortTagger {
        fn tag(&self, _words: &[String]) -> Result<Vec<TaggedToken>> {
            Ok(Vec::new())
        }

        fn name(&self) -> &'static str {
            "short"
        }
    }

    #[test]
    fn test_builtin_sentence() {
        let analyzer = PipelineAnalyzer::builtin();
        let tokens = analyzer
            .segment_and_tag("ประเทศไทยมีวัฒนธรรมที่หลากหลาย")
            .unwrap();
        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            rendered,
            [
                "ประเทศไทย/NPRP",
                "มี/VSTA",
                "วัฒนธรรม/NCMN",
                "ที่/PREL",
                "หลากหลาย/VATT"
            ]
        );
    }

    #[test]
    fn test_identity_depends_on_lexicon() {
        let a = PipelineAnalyzer::from_lexicon([("แมว", "NCMN")]);
        let b = PipelineAnalyzer::from_lexicon([("แมว", "VACT")]);
        let c = PipelineAnalyzer::from_lexicon([("แมว", "NCMN")]);
        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.identity(), c.identity());
        assert!(a.identity().starts_with("pipeline/dictionary+lexicon/"));
    }

    #[test]
    fn test_mismatched_tagger_output_is_tagging_failure() {
        let analyzer = PipelineAnalyzer::new(
            Box::new(DictionarySegmenter::new(["แมว"])),
            Box::new(ShortTagger),
        );
        let err = analyzer.segment_and_tag("แมว").unwrap_err();
        assert!(err.is_tagging_failure());
    }
}
