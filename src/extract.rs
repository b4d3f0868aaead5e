//! Core content extraction algorithm.
//!
//! Wires the stages together: signature boosts, candidate discovery,
//! feature computation, gravity scoring, best-node selection, sibling
//! complementation, cleaning and text projection.

use std::fmt;

use tracing::debug;

use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::extractor::{candidates, features, gravity, siblings, Annotations, SiblingContext};
use crate::html_processing;
use crate::options::Options;
use crate::result::{ContentNode, Extraction, ExtractionStats};
use crate::stopwords::{StopWordList, StopWordProvider};

/// Reusable extractor holding validated options and a stopword provider.
///
/// # Example
///
/// ```rust
/// use rs_newsextract::{Extractor, Options};
///
/// let extractor = Extractor::new(Options::default())?;
/// let html = "<html><body><article><p>It was the best of times, it was the worst of times.</p></article></body></html>";
/// let result = extractor.extract(html)?;
/// assert!(result.text.contains("best of times"));
/// # Ok::<(), rs_newsextract::Error>(())
/// ```
pub struct Extractor {
    options: Options,
    language: String,
    stop_words: Box<dyn StopWordProvider>,
}

impl Extractor {
    /// Build an extractor, loading the stopword list for the configured
    /// language.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedLanguage`] when the language code is malformed.
    pub fn new(options: Options) -> Result<Self> {
        let language = options.language_code()?;
        let stop_words = StopWordList::for_language(&language)?;
        Ok(Self {
            options,
            language,
            stop_words: Box::new(stop_words),
        })
    }

    /// Replace the stopword provider.
    #[must_use]
    pub fn with_stop_words<P>(mut self, provider: P) -> Self
    where
        P: StopWordProvider + 'static,
    {
        self.stop_words = Box::new(provider);
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Validated language code in use.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Parse `html` and extract its main content.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDocument`] when the parsed document has no root.
    pub fn extract(&self, html: &str) -> Result<Extraction> {
        debug!(html_len = html.len(), "starting content extraction");
        let document = dom::parse(html);
        self.extract_document(&document)
    }

    /// Extract the main content of an already parsed document.
    ///
    /// The document is only read; all scoring state lives in a side table
    /// dropped at the end of the call.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDocument`] when the document has no `<html>` root.
    pub fn extract_document(&self, document: &Document) -> Result<Extraction> {
        let root = dom::html_root(document).ok_or(Error::InvalidDocument)?;
        let stop_words = self.stop_words.as_ref();

        let mut annotations = Annotations::new();
        let boosted =
            gravity::apply_signature_boosts(&root, &self.options.signatures, &mut annotations);
        let found = candidates::discover(&root);
        let retained = features::compute(&found, stop_words, &self.language, &mut annotations);
        let pool = gravity::score(&retained, stop_words, &mut annotations);

        debug!(
            boosted,
            discovered = found.len(),
            retained = retained.len(),
            pool = pool.len(),
            "scored document"
        );

        let mut stats = ExtractionStats {
            candidates_discovered: found.len(),
            candidates_retained: retained.len(),
            parent_pool_size: pool.len(),
            ..ExtractionStats::default()
        };

        let Some(best) = gravity::select_best(document, &pool, &annotations) else {
            debug!("document has no body, nothing to extract");
            return Ok(Extraction {
                content: None,
                text: String::new(),
                stats,
            });
        };

        stats.best_tag = Some(best.tag());
        stats.best_score = best.score;
        stats.body_fallback = !best.from_pool;
        if stats.body_fallback {
            debug!("no scored container, falling back to body");
        }

        let mut content = if self.options.complement_siblings {
            stats.complemented = siblings::needs_complement(&best.node);
            let ctx = SiblingContext {
                annotations: &annotations,
                stop_words,
                language: &self.language,
            };
            siblings::complement(&best, &root, &ctx)
        } else {
            siblings::isolate(&best.node)
        };

        if self.options.clean {
            self.clean(&mut content);
        }
        let text = content.text();

        debug!(
            best = stats.best_tag.as_deref().unwrap_or(""),
            score = stats.best_score,
            text_len = text.len(),
            "extraction finished"
        );

        Ok(Extraction {
            content: Some(content),
            text,
            stats,
        })
    }

    /// Run the document cleaner over a content node in place.
    pub fn clean(&self, content: &mut ContentNode) {
        html_processing::clean_content(&content.root(), &self.options.signatures);
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

/// Main entry point for content extraction.
pub(crate) fn extract_content(html: &str, options: &Options) -> Result<Extraction> {
    Extractor::new(options.clone())?.extract(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::WordStats;

    const PARA: &str = "The quick fox ran over the hill and into the woods where it was safe.";

    #[test]
    fn article_page_extracts_article_text() {
        let html = format!(
            r#"<html><body>
                <nav><a href="/">Home</a><a href="/world">World</a></nav>
                <article><h1>Headline</h1><p>{PARA}</p><p>{PARA}</p></article>
            </body></html>"#
        );
        let result = extract_content(&html, &Options::default()).unwrap();
        assert!(result.text.starts_with("Headline"));
        assert!(result.text.contains(PARA));
        assert!(!result.text.contains("Home"));
        assert_eq!(result.stats.best_tag.as_deref(), Some("article"));
        assert!(!result.stats.complemented);
        assert!(!result.stats.body_fallback);
    }

    #[test]
    fn empty_page_falls_back_to_body() {
        let result = extract_content("", &Options::default()).unwrap();
        assert_eq!(result.stats.best_tag.as_deref(), Some("body"));
        assert!(result.stats.body_fallback);
        assert!(result.text.is_empty());
        assert!(result.content.is_some());
    }

    #[test]
    fn document_without_root_is_invalid() {
        let document = Document::from("<p>orphan</p>");
        document.select("html").remove();
        let extractor = Extractor::new(Options::default()).unwrap();
        let result = extractor.extract_document(&document);
        assert!(matches!(result, Err(Error::InvalidDocument)));
    }

    #[test]
    fn invalid_language_fails_construction() {
        let options = Options {
            language: Some("xyz".into()),
            ..Options::default()
        };
        assert!(matches!(
            Extractor::new(options),
            Err(Error::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn cleaning_can_be_disabled() {
        let html = format!(
            r#"<body><div id="wrap"><p>{PARA}</p><p>{PARA}</p><script>track()</script></div></body>"#
        );
        let options = Options {
            clean: false,
            ..Options::default()
        };
        let raw = extract_content(&html, &options).unwrap();
        let cleaned = extract_content(&html, &Options::default()).unwrap();
        assert!(raw.html().unwrap().contains("<script>"));
        assert!(!cleaned.html().unwrap().contains("<script>"));
    }

    struct EveryWordIsStop;

    impl StopWordProvider for EveryWordIsStop {
        fn tokenize(&self, text: &str) -> Vec<String> {
            text.split_whitespace().map(str::to_lowercase).collect()
        }

        fn is_stop_word(&self, _word: &str) -> bool {
            true
        }
    }

    #[test]
    fn custom_provider_is_used() {
        let html = "<body><div><p>alpha beta gamma delta</p></div></body>";
        let default = extract_content(html, &Options::default()).unwrap();
        assert_eq!(default.stats.candidates_retained, 0);

        let extractor = Extractor::new(Options::default())
            .unwrap()
            .with_stop_words(EveryWordIsStop);
        assert_eq!(
            EveryWordIsStop.word_stats("a b c"),
            WordStats {
                word_count: 3,
                stop_word_count: 3
            }
        );
        let custom = extractor.extract(html).unwrap();
        assert_eq!(custom.stats.candidates_retained, 1);
        assert_eq!(custom.text, "alpha beta gamma delta");
    }

    #[test]
    fn source_document_is_not_mutated() {
        let html = format!(r#"<body><div class="x"><p>{PARA}</p><p>{PARA}</p></div><aside>side</aside></body>"#);
        let document = Document::from(html.as_str());
        let before = document.html().to_string();
        let extractor = Extractor::new(Options::default()).unwrap();
        let result = extractor.extract_document(&document).unwrap();
        if let Some(content) = &result.content {
            content.root().select("p").remove();
        }
        assert_eq!(document.html().to_string(), before);
    }
}
