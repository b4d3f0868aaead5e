//! Stopword counting.
//!
//! The extractor only needs two things from a language: a tokenizer and a
//! stopword membership test. [`StopWordProvider`] captures that seam so
//! callers can plug their own lists; [`StopWordList`] is the default,
//! backed by the `stop-words` crate.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::error::{Error, Result};

#[allow(clippy::expect_used)]
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}'\s]").expect("PUNCTUATION regex"));

/// Raw word statistics for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Number of tokens.
    pub word_count: usize,
    /// Number of tokens that are stopwords.
    pub stop_word_count: usize,
}

/// Per-language tokenizer and stopword membership test.
pub trait StopWordProvider: Send + Sync {
    /// Split text into lowercase word tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Whether a (lowercase) token is a stopword.
    fn is_stop_word(&self, word: &str) -> bool;

    /// Count words and stopwords in `text`.
    fn word_stats(&self, text: &str) -> WordStats {
        let tokens = self.tokenize(text);
        let stop_word_count = tokens.iter().filter(|t| self.is_stop_word(t)).count();
        WordStats {
            word_count: tokens.len(),
            stop_word_count,
        }
    }
}

/// Stopword list for a single language.
#[derive(Debug, Clone)]
pub struct StopWordList {
    language: String,
    stopwords: FxHashSet<String>,
}

impl Default for StopWordList {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            stopwords: load_stopwords("en"),
        }
    }
}

impl StopWordList {
    /// Load the list for a two-letter language code.
    ///
    /// Codes without a bundled list fall back to English.
    pub fn for_language(code: &str) -> Result<Self> {
        let language = normalize_language(code)?;
        let stopwords = load_stopwords(&language);
        Ok(Self {
            language,
            stopwords,
        })
    }

    /// Build a list from explicit words.
    pub fn from_words<I, S>(language: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            language: language.to_ascii_lowercase(),
            stopwords: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// The language code of this list.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

impl StopWordProvider for StopWordList {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        PUNCTUATION
            .replace_all(&lowered, " ")
            .split_whitespace()
            .map(|w| w.trim_matches('\'').to_string())
            .filter(|w| !w.is_empty())
            .collect()
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

/// Validate and lowercase a two-letter language code.
pub fn normalize_language(code: &str) -> Result<String> {
    let code = code.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_lowercase())
    } else {
        Err(Error::UnsupportedLanguage(code.to_string()))
    }
}

fn load_stopwords(language: &str) -> FxHashSet<String> {
    let lang = match language {
        "de" => LANGUAGE::German,
        "fr" => LANGUAGE::French,
        "es" => LANGUAGE::Spanish,
        "it" => LANGUAGE::Italian,
        "pt" => LANGUAGE::Portuguese,
        "nl" => LANGUAGE::Dutch,
        "ru" => LANGUAGE::Russian,
        "sv" => LANGUAGE::Swedish,
        "no" => LANGUAGE::Norwegian,
        "da" => LANGUAGE::Danish,
        "fi" => LANGUAGE::Finnish,
        "hu" => LANGUAGE::Hungarian,
        "tr" => LANGUAGE::Turkish,
        "pl" => LANGUAGE::Polish,
        "ar" => LANGUAGE::Arabic,
        _ => LANGUAGE::English,
    };

    get(lang).iter().map(|s| s.to_string()).collect()
}
