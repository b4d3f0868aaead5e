//! Main content extraction module.
//!
//! # Module Structure
//!
//! - `annotations`: per-pass side table of node features and scores
//! - `candidates`: candidate discovery
//! - `features`: net stopword/word counts and link-density flags
//! - `gravity`: boost pre-pass, score propagation and best-node selection
//! - `siblings`: sibling complementation into a detached composite
//!
//! # Usage
//!
//! ```rust
//! use rs_newsextract::extractor::{candidates, features, gravity, Annotations};
//! use rs_newsextract::{dom, StopWordList};
//!
//! let doc = dom::parse("<body><div><p>It was the best of times, it was the worst of times.</p></div></body>");
//! let root = dom::html_root(&doc).expect("parsed documents have a root");
//! let provider = StopWordList::default();
//!
//! let mut annotations = Annotations::new();
//! let found = candidates::discover(&root);
//! let retained = features::compute(&found, &provider, "en", &mut annotations);
//! let pool = gravity::score(&retained, &provider, &mut annotations);
//! let best = gravity::select_best(&doc, &pool, &annotations).expect("document has a body");
//! assert_eq!(best.tag(), "div");
//! ```

pub mod annotations;
pub mod candidates;
pub mod features;
pub mod gravity;
pub mod siblings;

pub use annotations::{Annotations, Features, NodeAnnotation};
pub use candidates::{discover, Candidate};
pub use gravity::{select_best, BestNode, ParentPool, TailPenalty};
pub use siblings::{complement, isolate, SiblingContext};
