//! Feature computation.
//!
//! Candidates are processed deepest level first so every descendant is
//! final before its ancestors. A node's counts are net of all candidates
//! annotated below it, which keeps a long article container from being
//! credited again for the paragraphs it holds.

use dom_query::NodeId;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::annotations::{Annotations, Features};
use super::candidates::Candidate;
use crate::dom;
use crate::link_density::is_high_link_density;
use crate::stopwords::{StopWordProvider, WordStats};

/// Candidates with this many net stopwords or fewer are discarded.
pub const MIN_CANDIDATE_STOPWORDS: usize = 2;

/// Order candidates deepest level first, document order within a level.
#[must_use]
pub fn deepest_first<'a>(candidates: &[Candidate<'a>]) -> Vec<Candidate<'a>> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by(|a, b| b.level.cmp(&a.level).then(a.order.cmp(&b.order)));
    ordered
}

/// Annotate features on every candidate with text and return the retained
/// ones, deepest first.
///
/// Discarded candidates keep their annotation so their ancestors still net
/// them out.
pub fn compute<'a>(
    candidates: &[Candidate<'a>],
    stop_words: &dyn StopWordProvider,
    language: &str,
    annotations: &mut Annotations,
) -> Vec<Candidate<'a>> {
    // Net counts already claimed below each ancestor.
    let mut claimed: FxHashMap<NodeId, WordStats> = FxHashMap::default();
    let mut retained = Vec::new();

    for candidate in deepest_first(candidates) {
        let node = candidate.node;
        let text = dom::node_text(&node);
        if text.is_empty() {
            continue;
        }

        let raw = stop_words.word_stats(&text);
        let below = claimed.get(&node.id).copied().unwrap_or_default();
        let features = Features {
            stop_word_count: raw.stop_word_count.saturating_sub(below.stop_word_count),
            word_count: raw.word_count.saturating_sub(below.word_count),
            high_link_density: is_high_link_density(&node, language),
            level: candidate.level,
        };
        annotations.set_features(node.id, features);

        let mut ancestor = node.parent();
        while let Some(a) = ancestor {
            let entry = claimed.entry(a.id).or_default();
            entry.stop_word_count += features.stop_word_count;
            entry.word_count += features.word_count;
            ancestor = a.parent();
        }

        if features.stop_word_count <= MIN_CANDIDATE_STOPWORDS || features.high_link_density {
            trace!(
                tag = dom::node_tag(&node).as_deref().unwrap_or(""),
                stop_words = features.stop_word_count,
                high_link_density = features.high_link_density,
                "discarded candidate"
            );
            continue;
        }
        retained.push(candidate);
    }

    retained
}
