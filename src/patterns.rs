//! Compiled regex patterns and signature tables for content extraction.
//!
//! All patterns are compiled once using `LazyLock`. The patterns a site may
//! need to tune (boilerplate, article container, consent, keep-list) are
//! bundled in [`SignatureTables`], which can be rebuilt from caller strings.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

// =============================================================================
// Candidate Discovery Patterns
// =============================================================================

/// `itemprop` values that mark an element as article text.
pub static CANDIDATE_ITEMPROP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|\s)(articlebody|articletext|articlesection)(\s|$)")
        .expect("CANDIDATE_ITEMPROP regex")
});

/// Whole-word `id`/`class` tokens that mark an article container.
pub static CANDIDATE_ATTR_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[\s_-])(articlebody|article|story)($|[\s_-])")
        .expect("CANDIDATE_ATTR_WORD regex")
});

/// Class fragment used by CMSes for paragraph wrappers.
pub static PARAGRAPH_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)paragraph").expect("PARAGRAPH_CLASS regex"));

// =============================================================================
// Gravity Boost Signatures
// =============================================================================

/// `itemprop="articleBody"`.
pub static ITEMPROP_ARTICLE_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|\s)articlebody(\s|$)").expect("ITEMPROP_ARTICLE_BODY regex")
});

/// schema.org `Article` / `NewsArticle` item types.
pub static SCHEMA_NEWS_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)schema\.org/(news)?article(\s|$|/)").expect("SCHEMA_NEWS_ARTICLE regex")
});

/// schema.org article subtypes that carry a weaker signal.
pub static SCHEMA_OTHER_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)schema\.org/(blogposting|scholarlyarticle|socialmediaposting|techarticle)")
        .expect("SCHEMA_OTHER_ARTICLE regex")
});

/// Default class signature of an article body container.
pub static ARTICLE_CONTAINER_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|story|post|entry)[-_]?(body|content|text)")
        .expect("ARTICLE_CONTAINER_CLASS regex")
});

// =============================================================================
// Cleaner Patterns
// =============================================================================

/// Default boilerplate `id`/`class`/`name` signature.
pub static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^side$|combx|retweet|mediaarticlerelated|menucontainer|navbar|partner-gadget|storytopbar-bucket|utility-bar|inline-share-tools|comment|popularquestions|contact|foot(er|note)?|links$|meta$|shoutbox|sponsor|tags$|socialnetworking|^inset$|pagetools|post-attributes|welcome_form|contenttools2|the_answers|communitypromo|subscribe|vcard|articleheadings|^date$|^print$|popup|author-dropdown|^tools$|socialtools|byline|konafilter|breadcrumbs|^fn$|wp-caption-text|legende|ajoutvideo|timestamp|js_replies|disclaim)",
    )
    .expect("BOILERPLATE regex")
});

/// Drop-cap span classes.
pub static DROP_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|\s)drop[-_]?cap(\s|$)").expect("DROP_CAP regex"));

/// Caption, instagram and image-caption containers.
pub static CAPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)((^|[\s_-])caption($|[\s_])|instagram|image[-_]?caption)")
        .expect("CAPTION regex")
});

/// Google ad slots.
pub static GOOGLE_AD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(google[-_]?ad|adsbygoogle|adsense|div[-_]gpt[-_]ad|dfp[-_]ad)")
        .expect("GOOGLE_AD regex")
});

/// "More ..." teaser blocks.
pub static MORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)((^|[\s_-])(read[-_]?)?more($|[\s_-])|more[-_](stories|news|from|articles|on))")
        .expect("MORE regex")
});

/// Facebook, Twitter and broadcast widgets.
pub static SOCIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(facebook|fb[-_](like|share|root|comments)|twitter|tweet|broadcast)")
        .expect("SOCIAL regex")
});

/// Default consent / GDPR / tracking banner signature.
pub static CONSENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(cookie|consent|gdpr|onetrust|didomi|privacy[-_]?(banner|notice|popup)|tracking[-_]?(notice|banner))")
        .expect("CONSENT regex")
});

/// "related-X" link widgets.
pub static RELATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)related[-_]?(articles?|posts?|stories|content|links?|news|items?|videos?)")
        .expect("RELATED regex")
});

// =============================================================================
// Text Patterns
// =============================================================================

/// Literal tag-like substrings left in decoded text.
pub static TAG_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^<>]*>").expect("TAG_LIKE regex"));

/// Runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Tags that survive empty-node pruning.
pub const DEFAULT_KEEP_TAGS: &[&str] = &[
    "p", "br", "img", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "body", "article", "section",
];

/// Site-tunable signature tables.
///
/// `Default` yields the built-in tables. The `with_*` builders compile
/// caller-supplied patterns and fail with [`crate::Error::Pattern`].
///
/// # Example
///
/// ```rust
/// use rs_newsextract::SignatureTables;
///
/// let tables = SignatureTables::default().with_boilerplate(r"(?i)promo|teaser")?;
/// assert!(tables.boilerplate.is_match("home-teaser"));
/// # Ok::<(), rs_newsextract::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SignatureTables {
    /// `id`/`class`/`name` signature of boilerplate blocks.
    pub boilerplate: Regex,
    /// Class signature of article body containers.
    pub article_container: Regex,
    /// Consent / GDPR / tracking banner signature.
    pub consent: Regex,
    /// Tags never pruned for being empty.
    pub keep_tags: Vec<String>,
}

impl Default for SignatureTables {
    fn default() -> Self {
        Self {
            boilerplate: BOILERPLATE.clone(),
            article_container: ARTICLE_CONTAINER_CLASS.clone(),
            consent: CONSENT.clone(),
            keep_tags: DEFAULT_KEEP_TAGS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl SignatureTables {
    /// Replace the boilerplate signature.
    pub fn with_boilerplate(mut self, pattern: &str) -> Result<Self> {
        self.boilerplate = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the article container signature.
    pub fn with_article_container(mut self, pattern: &str) -> Result<Self> {
        self.article_container = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the consent banner signature.
    pub fn with_consent(mut self, pattern: &str) -> Result<Self> {
        self.consent = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the empty-node keep-list.
    #[must_use]
    pub fn with_keep_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep_tags = tags
            .into_iter()
            .map(|t| t.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Whether `tag` is on the keep-list.
    #[must_use]
    pub fn keeps(&self, tag: &str) -> bool {
        self.keep_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
