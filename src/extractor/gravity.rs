//! Gravity scoring, propagation and best-node selection.
//!
//! Retained candidates push an upscore into their parent (full weight) and
//! grandparent ([`GRANDPARENT_WEIGHT`]). Every node that receives a
//! contribution joins the [`ParentPool`]; the highest-scoring member is the
//! best node.


use dom_query::{Document, NodeId, NodeRef};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::annotations::Annotations;
use super::candidates::Candidate;
use crate::dom;
use crate::patterns::{
    SignatureTables, ITEMPROP_ARTICLE_BODY, SCHEMA_NEWS_ARTICLE, SCHEMA_OTHER_ARTICLE,
};
use crate::stopwords::StopWordProvider;

pub const SIBLING_BOOST_BASE: f64 = 30.0;
pub const SIBLING_LOOKBACK: usize = 3;
pub const SIBLING_BOOST_MIN_STOPWORDS: usize = 5;

pub const TAIL_PENALTY_MIN_CANDIDATES: usize = 15;
pub const TAIL_PENALTY_FRACTION: f64 = 0.25;
pub const TAIL_PENALTY_LIMIT: f64 = 40.0;
pub const TAIL_PENALTY_CLAMP: f64 = 5.0;

pub const GRANDPARENT_WEIGHT: f64 = 0.4;

// Signature boosts, the largest matching one applies.
const BOOST_ITEMPROP_ARTICLE_BODY: f64 = 100.0;
const BOOST_SCHEMA_NEWS_ARTICLE: f64 = 30.0;
const BOOST_ARTICLE_ELEMENT: f64 = 25.0;
const BOOST_SCHEMA_OTHER_ARTICLE: f64 = 20.0;
const BOOST_ARTICLE_CONTAINER_CLASS: f64 = 15.0;

/// One-time boost a node earns from strong article signatures.
#[must_use]
pub fn signature_boost(node: &NodeRef, tables: &SignatureTables) -> f64 {
    let mut boost: f64 = 0.0;

    if dom::node_attr(node, "itemprop").is_some_and(|v| ITEMPROP_ARTICLE_BODY.is_match(&v)) {
        boost = boost.max(BOOST_ITEMPROP_ARTICLE_BODY);
    }
    if let Some(itemtype) = dom::node_attr(node, "itemtype") {
        if SCHEMA_NEWS_ARTICLE.is_match(&itemtype) {
            boost = boost.max(BOOST_SCHEMA_NEWS_ARTICLE);
        } else if SCHEMA_OTHER_ARTICLE.is_match(&itemtype) {
            boost = boost.max(BOOST_SCHEMA_OTHER_ARTICLE);
        }
    }
    if dom::is_tag(node, "article")
        || dom::node_attr(node, "role").is_some_and(|r| r.trim().eq_ignore_ascii_case("article"))
    {
        boost = boost.max(BOOST_ARTICLE_ELEMENT);
    }
    if dom::node_attr(node, "class").is_some_and(|c| tables.article_container.is_match(&c)) {
        boost = boost.max(BOOST_ARTICLE_CONTAINER_CLASS);
    }

    boost
}

/// Boost pre-pass over every element under `root`.
///
/// Boosted nodes do not join the parent pool. Returns how many nodes were
/// boosted.
pub fn apply_signature_boosts(
    root: &NodeRef,
    tables: &SignatureTables,
    annotations: &mut Annotations,
) -> usize {
    let mut boosted = 0;
    for node in dom::element_descendants(root) {
        let boost = signature_boost(&node, tables);
        if boost > 0.0 {
            annotations.add_gravity(node.id, boost);
            boosted += 1;
        }
    }
    boosted
}

/// Nodes that received at least one score contribution, in insertion order.
#[derive(Default)]
pub struct ParentPool<'a> {
    nodes: Vec<NodeRef<'a>>,
    seen: FxHashSet<NodeId>,
}

impl<'a> ParentPool<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Add a node; returns `false` if it was already pooled.
    pub fn insert(&mut self, node: NodeRef<'a>) -> bool {
        if self.seen.insert(node.id) {
            self.nodes.push(node);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.seen.contains(&node_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeRef<'a>> {
        self.nodes.iter()
    }
}

/// Quadratic penalty for the trailing quarter of a long candidate list.
///
/// Trailing candidates on long pages are mostly comments and footers. The
/// penalty grows with the distance into the tail until the accumulated
/// magnitude would pass [`TAIL_PENALTY_LIMIT`]; from then on the fixed
/// [`TAIL_PENALTY_CLAMP`] is used instead.
#[derive(Debug, Clone)]
pub struct TailPenalty {
    count: usize,
    tail: f64,
    accumulated: f64,
}

impl TailPenalty {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            tail: count as f64 * TAIL_PENALTY_FRACTION,
            accumulated: 0.0,
        }
    }

    /// Penalty for the candidate at `rank` (0-based, document order).
    pub fn penalty(&mut self, rank: usize) -> f64 {
        if self.count <= TAIL_PENALTY_MIN_CANDIDATES {
            return 0.0;
        }
        let remaining = self.count.saturating_sub(rank) as f64;
        if remaining > self.tail {
            return 0.0;
        }

        let booster = self.tail - remaining;
        let penalty = -(booster * booster);
        if penalty.abs() + self.accumulated > TAIL_PENALTY_LIMIT {
            TAIL_PENALTY_CLAMP
        } else {
            self.accumulated += penalty.abs();
            penalty
        }
    }
}

/// Net stopwords of a sibling: its annotation if it was a candidate,
/// otherwise counted from its text.
fn sibling_stop_words(
    sibling: &NodeRef,
    stop_words: &dyn StopWordProvider,
    annotations: &Annotations,
) -> usize {
    annotations.features(sibling.id).map_or_else(
        || stop_words.word_stats(&dom::node_text(sibling)).stop_word_count,
        |f| f.stop_word_count,
    )
}

fn is_boostable(
    node: &NodeRef,
    stop_words: &dyn StopWordProvider,
    annotations: &Annotations,
) -> bool {
    dom::preceding_same_tag_siblings(node, SIBLING_LOOKBACK)
        .iter()
        .any(|s| sibling_stop_words(s, stop_words, annotations) > SIBLING_BOOST_MIN_STOPWORDS)
}

/// Main scoring pass over retained candidates (deepest first).
///
/// Returns the parent pool; scores land in `annotations`.
pub fn score<'a>(
    retained: &[Candidate<'a>],
    stop_words: &dyn StopWordProvider,
    annotations: &mut Annotations,
) -> ParentPool<'a> {
    let mut by_document: Vec<&Candidate<'a>> = retained.iter().collect();
    by_document.sort_by_key(|c| c.order);
    let rank: FxHashMap<NodeId, usize> = by_document
        .iter()
        .enumerate()
        .map(|(i, c)| (c.node.id, i))
        .collect();

    let mut pool = ParentPool::new();
    let mut tail = TailPenalty::new(retained.len());
    let mut boost_discount = 1.0;

    for candidate in retained {
        let node = candidate.node;
        let Some(features) = annotations.features(node.id) else {
            continue;
        };

        let mut boost = 0.0;
        if is_boostable(&node, stop_words, annotations) {
            boost = SIBLING_BOOST_BASE / boost_discount;
            boost_discount += 1.0;
        }
        let penalty = rank.get(&node.id).map_or(0.0, |&r| tail.penalty(r));
        let upscore = features.stop_word_count as f64 + boost + penalty;

        let Some(parent) = node.parent().filter(NodeRef::is_element) else {
            continue;
        };
        annotations.add_gravity(parent.id, upscore);
        annotations.add_gravity_node(parent.id);
        pool.insert(parent);

        if let Some(grandparent) = parent.parent().filter(NodeRef::is_element) {
            annotations.add_gravity(grandparent.id, upscore * GRANDPARENT_WEIGHT);
            annotations.add_gravity_node(grandparent.id);
            pool.insert(grandparent);
        }

        trace!(
            tag = dom::node_tag(&node).as_deref().unwrap_or(""),
            upscore,
            boost,
            penalty,
            "scored candidate"
        );
    }

    pool
}

/// The chosen content anchor.
#[derive(Clone, Copy)]
pub struct BestNode<'a> {
    pub node: NodeRef<'a>,
    /// Gravity score of `node` after the full pass.
    pub score: f64,
    /// `false` when the `<body>` fallback was used.
    pub from_pool: bool,
}

impl BestNode<'_> {
    #[must_use]
    pub fn tag(&self) -> String {
        dom::node_tag(&self.node).unwrap_or_default()
    }
}

/// Highest-scoring pool member, or `<body>` when the pool is empty.
///
/// The sort is stable, so ties go to the earlier pool member. `<html>`
/// itself is never returned; `<body>` stands in for it. Returns `None`
/// when the document has no `<body>` to fall back on.
#[must_use]
pub fn select_best<'a>(
    document: &'a Document,
    pool: &ParentPool<'a>,
    annotations: &Annotations,
) -> Option<BestNode<'a>> {
    let body = dom::body(document);

    let mut ranked: Vec<(NodeRef<'a>, f64)> = pool
        .iter()
        .map(|n| (*n, annotations.gravity_score(n.id)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    match ranked.first() {
        Some((node, _)) if dom::is_tag(node, "html") => body.map(|b| BestNode {
            node: b,
            score: annotations.gravity_score(b.id),
            from_pool: pool.contains(b.id),
        }),
        Some((node, score)) => Some(BestNode {
            node: *node,
            score: *score,
            from_pool: true,
        }),
        None => body.map(|b| BestNode {
            node: b,
            score: annotations.gravity_score(b.id),
            from_pool: false,
        }),
    }
}
