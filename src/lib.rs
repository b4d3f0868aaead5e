//! # rs-newsextract
//!
//! Main-content extraction for news pages.
//!
//! This library finds the article body of an HTML page by scoring the tree
//! with stopword and link-density features, propagating "gravity" into
//! container elements, folding in article-like siblings of the winner and
//! finally stripping boilerplate from the detached result.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_newsextract::extract;
//!
//! let html = r#"<html><body>
//! <nav><a href="/">Home</a> <a href="/world">World</a> <a href="/sport">Sport</a></nav>
//! <article>
//!   <p>The council said on Monday that the new bridge would open to traffic in the spring.</p>
//!   <p>It is the first crossing to be built in the city for more than a decade.</p>
//! </article>
//! </body></html>"#;
//!
//! let result = extract(html)?;
//! assert!(result.text.contains("new bridge"));
//! assert!(!result.text.contains("Sport"));
//! # Ok::<(), rs_newsextract::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Candidate discovery**: paragraph-like tags and elements whose
//!   attributes mark them as article text
//! - **Feature computation**: net stopword/word counts and link density,
//!   deepest candidates first
//! - **Gravity scoring**: boosts, parent/grandparent propagation and
//!   best-node selection
//! - **Sibling complementation**: same-level siblings merged into a detached
//!   composite
//! - **Document cleaning**: ordered boilerplate pruning of the composite

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM query helpers over `dom_query`.
pub mod dom;

/// Document cleaner and text projection.
pub mod html_processing;

/// Scoring stages (annotations, candidates, features, gravity, siblings).
pub mod extractor;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Stopword lists and the provider seam.
pub mod stopwords;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::Extractor;
pub use html_processing::clean_content;
pub use options::{Options, DEFAULT_LANGUAGE};
pub use patterns::SignatureTables;
pub use result::{ContentNode, Extraction, ExtractionStats};
pub use stopwords::{StopWordList, StopWordProvider, WordStats};

/// Extracts main content from an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use rs_newsextract::extract;
///
/// let html = "<html><body><article><p>This is the story of how it all began.</p></article></body></html>";
/// let result = extract(html)?;
/// println!("{}", result.text);
/// # Ok::<(), rs_newsextract::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &str) -> Result<Extraction> {
    extract_with_options(html, &Options::default())
}

/// Extracts main content from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_newsextract::{extract_with_options, Options};
///
/// let html = "<html><body><article><p>This is the story of how it all began.</p></article></body></html>";
/// let options = Options {
///     language: Some("en".to_string()),
///     complement_siblings: false,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, &options)?;
/// # Ok::<(), rs_newsextract::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_with_options(html: &str, options: &Options) -> Result<Extraction> {
    extract::extract_content(html, options)
}
