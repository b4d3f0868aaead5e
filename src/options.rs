//! Configuration options for content extraction.
//!
//! The `Options` struct controls extraction behavior: the language used for
//! stopwords and link-density word counting, the site-tunable signature
//! tables, and which post-selection stages run.

use crate::patterns::SignatureTables;
use crate::stopwords::normalize_language;
use crate::error::Result;

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_newsextract::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     language: Some("de".to_string()),
///     complement_siblings: false,
///     ..Options::default()
/// };
/// assert_eq!(options.language_code()?, "de");
/// # Ok::<(), rs_newsextract::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Two-letter language code selecting stopwords and the word-counting
    /// allow-list.
    ///
    /// Default: `None` (English)
    pub language: Option<String>,

    /// Boilerplate, article-container and consent signatures plus the
    /// empty-node keep-list.
    ///
    /// Default: built-in tables
    pub signatures: SignatureTables,

    /// Run the document cleaner on the composite content node.
    ///
    /// Default: `true`
    pub clean: bool,

    /// Fold in same-level siblings of the best node.
    ///
    /// When disabled, the best node is cloned on its own.
    ///
    /// Default: `true`
    pub complement_siblings: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            language: None,
            signatures: SignatureTables::default(),
            clean: true,
            complement_siblings: true,
        }
    }
}

impl Options {
    /// Validated, lowercase language code.
    ///
    /// # Errors
    ///
    /// [`crate::Error::UnsupportedLanguage`] when the configured code is not
    /// two ASCII letters.
    pub fn language_code(&self) -> Result<String> {
        match self.language.as_deref() {
            Some(code) => normalize_language(code),
            None => Ok(DEFAULT_LANGUAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(options.language.is_none());
        assert!(options.clean);
        assert!(options.complement_siblings);
        assert_eq!(options.language_code().unwrap(), "en");
        assert!(options.signatures.keeps("p"));
    }

    #[test]
    fn test_language_code_is_normalized() {
        let options = Options {
            language: Some(" FR ".to_string()),
            ..Options::default()
        };
        assert_eq!(options.language_code().unwrap(), "fr");
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        let options = Options {
            language: Some("french".to_string()),
            ..Options::default()
        };
        assert!(matches!(
            options.language_code(),
            Err(Error::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_boolean_options_can_be_toggled() {
        let options = Options {
            clean: false,
            complement_siblings: false,
            ..Options::default()
        };
        assert!(!options.clean);
        assert!(!options.complement_siblings);
    }
}
