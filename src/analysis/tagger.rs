//! Tokenize-and-tag stage.
//!
//! [`TokenTagger`] wraps a [`LinguisticAnalyzer`] with the behaviour the
//! pipeline relies on:
//!
//! - empty text never reaches the analyzer
//! - words are trimmed and empty words dropped
//! - pure-Latin words are re-tagged by length (`NCMN` above three letters,
//!   `VACT` otherwise), since Thai taggers have no model for them
//! - successful results are cached by content and analyzer identity
//! - analyzer errors, panics and timeouts all surface as tagging failures
//!   and are never cached

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::analysis::token::{TAG_NOUN_COMMON, TAG_VERB_ACTIVE, TaggedToken};
use crate::analysis::tokenizer::LinguisticAnalyzer;
use crate::cache::{CacheKey, CacheStage, CachedValue, ContentCache, Fingerprint};
use crate::error::{Result, ThaifreqError};
use crate::perf::OperationTimer;
use crate::util::deadline::maybe_with_deadline;

const TAGGER_ID: &str = "tokenize/v1";

/// Latin words longer than this many letters are tagged as nouns.
const LATIN_NOUN_MIN_EXCLUSIVE: usize = 3;

/// Segments and tags cleaned text through a [`LinguisticAnalyzer`].
pub struct TokenTagger {
    analyzer: Arc<dyn LinguisticAnalyzer>,
    cache: Option<Arc<ContentCache>>,
    timeout: Option<Duration>,
}

impl TokenTagger {
    pub fn new(analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        TokenTagger {
            analyzer,
            cache: None,
            timeout: None,
        }
    }

    /// Memoize results in `cache`.
    pub fn with_cache(mut self, cache: Arc<ContentCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Give up on the analyzer after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The wrapped analyzer.
    pub fn analyzer(&self) -> &Arc<dyn LinguisticAnalyzer> {
        &self.analyzer
    }

    /// Cache key for `cleaned_text` under this tagger's analyzer.
    pub fn cache_key(&self, cleaned_text: &str) -> CacheKey {
        let identity = self.analyzer.identity();
        CacheKey::new(
            CacheStage::Tokenize,
            Fingerprint::of_parts(&[TAGGER_ID, identity.as_str(), cleaned_text]),
        )
    }

    /// Segment and tag `cleaned_text`.
    ///
    /// Whitespace-only text yields an empty sequence without calling the
    /// analyzer. Every failure is a [`ThaifreqError::Tagging`].
    pub fn tokenize_and_tag(&self, cleaned_text: &str) -> Result<Vec<TaggedToken>> {
        if cleaned_text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let key = self.cache_key(cleaned_text);
        if let Some(cache) = &self.cache {
            if let Some(CachedValue::Tagged(tokens)) = cache.get(&key) {
                trace!("tokenize cache hit {}", key.fingerprint);
                return Ok(tokens);
            }
        }

        let timer = OperationTimer::start();
        let raw = self.call_analyzer(cleaned_text)?;
        let tokens = postprocess(raw);
        debug!(
            "{} tagged {} words in {:?}",
            self.analyzer.name(),
            tokens.len(),
            timer.stop()
        );

        if let Some(cache) = &self.cache {
            cache.set(key, CachedValue::Tagged(tokens.clone()), true);
        }
        Ok(tokens)
    }

    fn call_analyzer(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let outcome = match self.timeout {
            None => panic::catch_unwind(AssertUnwindSafe(|| self.analyzer.segment_and_tag(text)))
                .unwrap_or_else(|payload| Err(ThaifreqError::internal(panic_message(&*payload)))),
            Some(_) => {
                let analyzer = Arc::clone(&self.analyzer);
                let owned = text.to_string();
                maybe_with_deadline("tagger", self.timeout, move || {
                    analyzer.segment_and_tag(&owned)
                })
                .and_then(|inner| inner)
            }
        };

        outcome.map_err(|e| {
            warn!("{} failed: {e}", self.analyzer.name());
            match e {
                ThaifreqError::Tagging(_) => e,
                other => ThaifreqError::tagging(other.to_string()),
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("analyzer panicked: {detail}")
}

impl std::fmt::Debug for TokenTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenTagger")
            .field("analyzer", &self.analyzer.identity())
            .field("cached", &self.cache.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn postprocess(raw: Vec<TaggedToken>) -> Vec<TaggedToken> {
    raw.into_iter()
        .filter_map(|token| {
            let word = token.word.trim();
            if word.is_empty() {
                return None;
            }
            let mut token = TaggedToken::new(word, token.tag);
            if token.is_latin() {
                token.tag = latin_tag(&token).to_string();
            }
            Some(token)
        })
        .collect()
}

fn latin_tag(token: &TaggedToken) -> &'static str {
    if token.char_len() > LATIN_NOUN_MIN_EXCLUSIVE {
        TAG_NOUN_COMMON
    } else {
        TAG_VERB_ACTIVE
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::analysis::tokenizer::pipeline::PipelineAnalyzer;

    /// Analyzer that counts calls and returns canned tokens.
    struct ScriptedAnalyzer {
        calls: AtomicUsize,
        output: Vec<TaggedToken>,
        fail: bool,
        delay: Option<Duration>,
    }

    impl ScriptedAnalyzer {
        fn returning(output: Vec<TaggedToken>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                output,
                fail: false,
                delay: None,
            }
        }
    }

    impl LinguisticAnalyzer for ScriptedAnalyzer {
        fn segment_and_tag(&self, _text: &str) -> Result<Vec<TaggedToken>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            if self.fail {
                return Err(ThaifreqError::other("engine crashed"));
            }
            Ok(self.output.clone())
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    #[test]
    fn test_latin_heuristic() {
        let analyzer = Arc::new(ScriptedAnalyzer::returning(vec![
            TaggedToken::new("hello", "X"),
            TaggedToken::new("cat", "X"),
            TaggedToken::new("abcd", "X"),
            TaggedToken::new("แมว", "NCMN"),
        ]));
        let tagger = TokenTagger::new(analyzer);
        let tokens = tagger.tokenize_and_tag("anything").unwrap();

        assert_eq!(
            tokens,
            vec![
                TaggedToken::new("hello", "NCMN"),
                TaggedToken::new("cat", "VACT"),
                TaggedToken::new("abcd", "NCMN"),
                TaggedToken::new("แมว", "NCMN"),
            ]
        );
    }

    #[test]
    fn test_blank_words_dropped_and_trimmed() {
        let analyzer = Arc::new(ScriptedAnalyzer::returning(vec![
            TaggedToken::new(" ", "PUNC"),
            TaggedToken::new(" แมว ", "NCMN"),
            TaggedToken::new("", "NCMN"),
        ]));
        let tagger = TokenTagger::new(analyzer);
        let tokens = tagger.tokenize_and_tag("แมว").unwrap();
        assert_eq!(tokens, vec![TaggedToken::new("แมว", "NCMN")]);
    }

    #[test]
    fn test_empty_text_skips_analyzer() {
        let analyzer = Arc::new(ScriptedAnalyzer::returning(vec![]));
        let tagger = TokenTagger::new(analyzer.clone());
        assert!(tagger.tokenize_and_tag("").unwrap().is_empty());
        assert!(tagger.tokenize_and_tag("   ").unwrap().is_empty());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cache_avoids_second_call() {
        let analyzer = Arc::new(ScriptedAnalyzer::returning(vec![TaggedToken::new(
            "แมว", "NCMN",
        )]));
        let cache = Arc::new(ContentCache::memory_only(64));
        let tagger = TokenTagger::new(analyzer.clone()).with_cache(cache);

        let first = tagger.tokenize_and_tag("แมว").unwrap();
        let second = tagger.tokenize_and_tag("แมว").unwrap();
        assert_eq!(first, second);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_is_tagging_error_and_not_cached() {
        let analyzer = Arc::new(ScriptedAnalyzer {
            fail: true,
            ..ScriptedAnalyzer::returning(vec![])
        });
        let cache = Arc::new(ContentCache::memory_only(64));
        let tagger = TokenTagger::new(analyzer.clone()).with_cache(cache.clone());

        let err = tagger.tokenize_and_tag("แมว").unwrap_err();
        assert!(matches!(err, ThaifreqError::Tagging(_)));
        assert!(tagger.tokenize_and_tag("แมว").is_err());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 2);
        assert!(cache.get(&tagger.cache_key("แมว")).is_none());
    }

    #[test]
    fn test_timeout_is_tagging_failure() {
        let analyzer = Arc::new(ScriptedAnalyzer {
            delay: Some(Duration::from_millis(500)),
            ..ScriptedAnalyzer::returning(vec![TaggedToken::new("แมว", "NCMN")])
        });
        let tagger = TokenTagger::new(analyzer).with_timeout(Some(Duration::from_millis(20)));

        let err = tagger.tokenize_and_tag("แมว").unwrap_err();
        assert!(matches!(err, ThaifreqError::Tagging(_)));
    }

    struct PanickingAnalyzer;

    impl LinguisticAnalyzer for PanickingAnalyzer {
        fn segment_and_tag(&self, _text: &str) -> Result<Vec<TaggedToken>> {
            panic!("dictionary not loaded");
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[test]
    fn test_panic_is_tagging_failure_without_timeout() {
        let cache = Arc::new(ContentCache::memory_only(64));
        let tagger = TokenTagger::new(Arc::new(PanickingAnalyzer)).with_cache(cache.clone());

        match tagger.tokenize_and_tag("แมว") {
            Err(ThaifreqError::Tagging(msg)) => assert!(msg.contains("dictionary not loaded")),
            other => panic!("expected tagging failure, got {other:?}"),
        }
        assert!(cache.get(&tagger.cache_key("แมว")).is_none());
    }

    #[test]
    fn test_panic_is_tagging_failure_with_timeout() {
        let tagger = TokenTagger::new(Arc::new(PanickingAnalyzer))
            .with_timeout(Some(Duration::from_secs(5)));
        let err = tagger.tokenize_and_tag("แมว").unwrap_err();
        assert!(matches!(err, ThaifreqError::Tagging(_)));
    }

    #[test]
    fn test_with_builtin_analyzer() {
        let tagger = TokenTagger::new(Arc::new(PipelineAnalyzer::builtin()));
        let tokens = tagger.tokenize_and_tag("แมวแมวแมว").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.word == "แมว" && t.tag == "NCMN"));
    }

    #[test]
    fn test_cache_key_varies_with_analyzer() {
        let a = TokenTagger::new(Arc::new(PipelineAnalyzer::from_lexicon([("a", "X")])));
        let b = TokenTagger::new(Arc::new(PipelineAnalyzer::from_lexicon([("b", "X")])));
        assert_ne!(a.cache_key("text"), b.cache_key("text"));
        assert_eq!(a.cache_key("text"), a.cache_key("text"));
    }
}
