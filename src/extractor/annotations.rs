//! Scratch annotations for one extraction pass.
//!
//! Scoring state lives in a side table keyed by `NodeId` instead of being
//! written onto the parsed tree, so scoring never mutates the source
//! document. A table is created per call and dropped afterwards; a second
//! pass over the same tree starts from a fresh table.

use dom_query::NodeId;
use rustc_hash::FxHashMap;

/// Per-candidate features, net of annotated descendants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// Stopwords in the node's own text (descendant candidates excluded).
    pub stop_word_count: usize,
    /// Words in the node's own text (descendant candidates excluded).
    pub word_count: usize,
    /// Whether the node is dominated by link text.
    pub high_link_density: bool,
    /// Ancestor-step count to the root.
    pub level: usize,
}

/// Everything recorded about a single node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeAnnotation {
    /// Set once by feature computation.
    pub features: Option<Features>,
    /// Accumulated gravity, additive.
    pub gravity_score: f64,
    /// Number of contributions received, additive.
    pub gravity_nodes: u32,
}

/// Side table of node annotations.
#[derive(Debug, Default)]
pub struct Annotations {
    nodes: FxHashMap<NodeId, NodeAnnotation>,
}

impl Annotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotation of a node, if anything was recorded.
    #[must_use]
    pub fn get(&self, node_id: NodeId) -> Option<&NodeAnnotation> {
        self.nodes.get(&node_id)
    }

    /// Features of a node, if it was processed as a candidate.
    #[must_use]
    pub fn features(&self, node_id: NodeId) -> Option<Features> {
        self.nodes.get(&node_id).and_then(|a| a.features)
    }

    /// Record the features of a candidate.
    pub fn set_features(&mut self, node_id: NodeId, features: Features) {
        self.nodes.entry(node_id).or_default().features = Some(features);
    }

    /// Gravity score of a node (0 when never scored).
    #[must_use]
    pub fn gravity_score(&self, node_id: NodeId) -> f64 {
        self.nodes.get(&node_id).map_or(0.0, |a| a.gravity_score)
    }

    /// Number of contributions a node received.
    #[must_use]
    pub fn gravity_nodes(&self, node_id: NodeId) -> u32 {
        self.nodes.get(&node_id).map_or(0, |a| a.gravity_nodes)
    }

    /// Add to a node's gravity score.
    pub fn add_gravity(&mut self, node_id: NodeId, score: f64) {
        self.nodes.entry(node_id).or_default().gravity_score += score;
    }

    /// Count one more contribution to a node.
    pub fn add_gravity_node(&mut self, node_id: NodeId) {
        self.nodes.entry(node_id).or_default().gravity_nodes += 1;
    }

    /// Number of annotated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
