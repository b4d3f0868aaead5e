//! Candidate discovery.
//!
//! Collects the nodes eligible to anchor content: paragraph-like tags,
//! `<article>`, and elements whose attributes mark them as article text.

use dom_query::NodeRef;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::dom;
use crate::patterns::{CANDIDATE_ATTR_WORD, CANDIDATE_ITEMPROP, PARAGRAPH_CLASS};

/// Tags that are always candidates.
pub const CANDIDATE_TAGS: &[&str] = &["p", "pre", "td", "article"];

/// How many leading `<div>`s stand in when no attribute signature matches.
pub const FALLBACK_DIVS: usize = 5;

/// A node provisionally eligible to anchor content.
#[derive(Clone, Copy)]
pub struct Candidate<'a> {
    /// The candidate node in the source tree.
    pub node: NodeRef<'a>,
    /// Position in document order among all elements under the root.
    pub order: usize,
    /// Ancestor-step count to the tree root.
    pub level: usize,
}

/// Whether a node's attributes mark it as article text.
#[must_use]
pub fn matches_article_attrs(node: &NodeRef) -> bool {
    if dom::node_attr(node, "itemprop").is_some_and(|v| CANDIDATE_ITEMPROP.is_match(&v)) {
        return true;
    }
    if dom::node_attr(node, "id").is_some_and(|v| CANDIDATE_ATTR_WORD.is_match(&v)) {
        return true;
    }
    dom::node_attr(node, "class")
        .is_some_and(|v| CANDIDATE_ATTR_WORD.is_match(&v) || PARAGRAPH_CLASS.is_match(&v))
}

/// Collect candidates under `root` in document order, de-duplicated by
/// node identity.
///
/// When no element matches an attribute signature, the first
/// [`FALLBACK_DIVS`] `<div>` elements are added instead.
#[must_use]
pub fn discover<'a>(root: &NodeRef<'a>) -> Vec<Candidate<'a>> {
    let elements = dom::element_descendants(root);
    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();
    let mut any_attr_match = false;

    for (order, node) in elements.iter().enumerate() {
        let by_tag = dom::node_tag(node).is_some_and(|t| CANDIDATE_TAGS.contains(&t.as_str()));
        let by_attr = matches_article_attrs(node);
        any_attr_match |= by_attr;

        if (by_tag || by_attr) && seen.insert(node.id) {
            candidates.push(Candidate {
                node: *node,
                order,
                level: dom::level_of(node),
            });
        }
    }

    if !any_attr_match {
        let divs = elements
            .iter()
            .enumerate()
            .filter(|(_, n)| dom::is_tag(n, "div"))
            .take(FALLBACK_DIVS);
        for (order, node) in divs {
            if seen.insert(node.id) {
                candidates.push(Candidate {
                    node: *node,
                    order,
                    level: dom::level_of(node),
                });
            }
        }
        candidates.sort_by_key(|c| c.order);
    }

    trace!(
        count = candidates.len(),
        attr_signatures = any_attr_match,
        "discovered candidates"
    );
    candidates
}
