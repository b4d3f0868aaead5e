//! Link Density Testing
//!
//! Decides whether a node is dominated by link text (probably navigation or
//! a link widget). The tolerated share of link words shrinks as the node
//! grows: short blurbs may be ~70% links, long text only ~35%.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use dom_query::{NodeRef, Selection};
use regex::Regex;

use crate::dom;

/// Short-text rule: below this many words...
const SHORT_TEXT_WORDS: usize = 50;
/// ...more than this many links...
const SHORT_TEXT_MAX_LINKS: usize = 2;
/// ...covering more than this percentage of words is high density.
const SHORT_TEXT_MAX_PERCENT: f64 = 50.0;

// Characters outside a language's allow-list are dropped before counting.
static LATIN_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("LATIN_ASCII regex"));
static LATIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Latin}0-9\s]").expect("LATIN regex"));
static CYRILLIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Cyrillic}\p{Latin}0-9\s]").expect("CYRILLIC regex"));
static GREEK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Greek}\p{Latin}0-9\s]").expect("GREEK regex"));
static ARABIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Arabic}\p{Latin}0-9\s]").expect("ARABIC regex"));
static HEBREW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Hebrew}\p{Latin}0-9\s]").expect("HEBREW regex"));
static DEVANAGARI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Devanagari}\p{Latin}0-9\s]").expect("DEVANAGARI regex"));
static THAI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Thai}\p{Latin}0-9\s]").expect("THAI regex"));
static CJK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}\p{Latin}0-9\s]").expect("CJK regex")
});

/// Allow-list filter for a two-letter language code.
fn allow_list(language: &str) -> &'static Regex {
    match language {
        "de" | "fr" | "es" | "it" | "pt" | "nl" | "sv" | "no" | "da" | "fi" | "hu" | "tr"
        | "pl" | "cs" | "sk" | "ro" | "hr" | "sl" | "et" | "lv" | "lt" | "is" | "ca" | "vi"
        | "id" | "ms" => &LATIN,
        "ru" | "uk" | "bg" | "sr" | "mk" | "be" | "kk" => &CYRILLIC,
        "el" => &GREEK,
        "ar" | "fa" | "ur" => &ARABIC,
        "he" | "yi" => &HEBREW,
        "hi" | "mr" | "ne" => &DEVANAGARI,
        "th" => &THAI,
        "zh" | "ja" | "ko" => &CJK,
        _ => &LATIN_ASCII,
    }
}

/// Count words of `text` after dropping characters outside the language's
/// allow-list.
#[must_use]
pub fn count_words(text: &str, language: &str) -> usize {
    allow_list(language)
        .replace_all(text, "")
        .split_whitespace()
        .count()
}

/// Maximum tolerated link-word percentage for a node of `word_count` words.
///
/// `87 - 70 / (1.3 + e^(1 - words/200))`: about 70% for short text,
/// approaching 34% for long text. Non-increasing in `word_count`.
#[must_use]
pub fn link_density_threshold(word_count: usize) -> f64 {
    let exponent = 1.0 - word_count as f64 / 200.0;
    87.0 - 70.0 / (1.3 + exponent.exp())
}

/// Whether `node` is dominated by link text.
///
/// The curve is evaluated first; the short-text rule only applies when the
/// curve does not already flag the node.
#[must_use]
pub fn is_high_link_density(node: &NodeRef, language: &str) -> bool {
    let links = Selection::from(*node).select("a");
    let link_count = links.length();
    if link_count == 0 {
        return false;
    }

    let word_count = count_words(&dom::node_text(node), language);
    let link_words: usize = links
        .nodes()
        .iter()
        .map(|a| count_words(&dom::node_text(a), language))
        .sum();

    let percent = if word_count == 0 {
        0.0
    } else {
        link_words as f64 / word_count as f64 * 100.0
    };

    if percent > link_density_threshold(word_count) {
        return true;
    }

    word_count < SHORT_TEXT_WORDS && link_count > SHORT_TEXT_MAX_LINKS && percent > SHORT_TEXT_MAX_PERCENT
}
