//! Sibling complementation.
//!
//! Articles are often split across several same-level containers (a lead
//! block, the body, a continuation after an ad slot). Siblings of the best
//! node that look as strong as its paragraphs are folded in wholesale; weaker
//! ones only contribute the clean paragraphs they hold.

use dom_query::{NodeRef, Selection};
use tracing::{debug, trace};

use super::annotations::Annotations;
use super::gravity::BestNode;
use crate::dom;
use crate::link_density::is_high_link_density;
use crate::result::ContentNode;
use crate::stopwords::StopWordProvider;

/// Share of the baseline a sibling (or salvaged paragraph) must exceed.
pub const SIBLING_ADMIT_RATIO: f64 = 0.3;

/// Average positive gravity score over the `<p>` descendants of `best`.
///
/// `f64::INFINITY` when no paragraph scored, meaning "use the best node's
/// own score".
#[must_use]
pub fn sibling_baseline(best: &NodeRef, annotations: &Annotations) -> f64 {
    let scores: Vec<f64> = Selection::from(*best)
        .select("p")
        .nodes()
        .iter()
        .map(|p| annotations.gravity_score(p.id))
        .filter(|s| *s > 0.0)
        .collect();

    if scores.is_empty() {
        f64::INFINITY
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Whether complementation applies to this best node at all.
#[must_use]
pub fn needs_complement(best: &NodeRef) -> bool {
    !(dom::is_tag(best, "body") || dom::is_tag(best, "article"))
}

/// Clone the best node alone into a detached content node.
#[must_use]
pub fn isolate(best: &NodeRef) -> ContentNode {
    let html = dom::outer_html(&Selection::from(*best)).to_string();
    ContentNode::from_element_html(&html, &dom::node_tag(best).unwrap_or_default())
}

/// Inputs shared by the complementation helpers.
pub struct SiblingContext<'s> {
    pub annotations: &'s Annotations,
    pub stop_words: &'s dyn StopWordProvider,
    pub language: &'s str,
}

impl SiblingContext<'_> {
    fn high_link_density(&self, node: &NodeRef) -> bool {
        self.annotations
            .features(node.id)
            .map_or_else(|| is_high_link_density(node, self.language), |f| f.high_link_density)
    }

    fn stop_words_of(&self, node: &NodeRef) -> usize {
        self.annotations.features(node.id).map_or_else(
            || self.stop_words.word_stats(&dom::node_text(node)).stop_word_count,
            |f| f.stop_word_count,
        )
    }

    /// Paragraphs of a weak sibling worth keeping, as plain `<p>` markup.
    fn salvage(&self, sibling: &NodeRef, threshold: f64) -> Vec<String> {
        let mut out = Vec::new();
        for p in Selection::from(*sibling).select("p").nodes() {
            let stop_words = self.stop_words_of(p);
            if stop_words == 0 || self.high_link_density(p) {
                continue;
            }
            if stop_words as f64 > threshold {
                let text = dom::node_text(p);
                out.push(format!("<p>{}</p>", dom::escape_html(&text)));
            }
        }
        out
    }
}

/// Build the detached composite for `best`.
///
/// `<body>` and `<article>` winners are cloned as-is. Otherwise every
/// element on the best node's level is visited in document order: the best
/// node and admitted siblings are cloned whole, weaker same-tag siblings
/// contribute salvaged paragraphs, and everything is wrapped in a `<div>`.
#[must_use]
pub fn complement(best: &BestNode, root: &NodeRef, ctx: &SiblingContext) -> ContentNode {
    let best_node = best.node;
    if !needs_complement(&best_node) {
        return isolate(&best_node);
    }

    let Some(tag) = dom::node_tag(&best_node) else {
        return ContentNode::from_html("<div></div>", false);
    };

    let mut baseline = sibling_baseline(&best_node, ctx.annotations);
    if baseline.is_infinite() {
        baseline = best.score;
    }
    let threshold = baseline * SIBLING_ADMIT_RATIO;

    let mut pieces = Vec::new();
    let mut admitted = 0usize;
    let mut salvaged = 0usize;

    for node in dom::nodes_at_level(root, dom::level_of(&best_node)) {
        if node.id == best_node.id {
            pieces.push(dom::outer_html(&Selection::from(node)).to_string());
            continue;
        }
        if !dom::is_tag(&node, &tag) {
            continue;
        }

        let score = ctx.annotations.gravity_score(node.id);
        if score > threshold && !ctx.high_link_density(&node) {
            trace!(score, threshold, "admitted sibling");
            pieces.push(dom::outer_html(&Selection::from(node)).to_string());
            admitted += 1;
        } else {
            let paragraphs = ctx.salvage(&node, threshold);
            salvaged += paragraphs.len();
            pieces.extend(paragraphs);
        }
    }

    debug!(tag = tag.as_str(), baseline, admitted, salvaged, "complemented best node");
    ContentNode::from_html(&format!("<div>{}</div>", pieces.concat()), false)
}
