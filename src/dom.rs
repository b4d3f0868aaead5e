//! DOM query layer.
//!
//! Thin helpers over the `dom_query` crate: attribute and tag access,
//! structural queries (level, same-level walks, sibling walks), clean text
//! extraction, and the handful of in-place edits the cleaner needs.

use std::collections::VecDeque;

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use crate::patterns::{TAG_LIKE, WHITESPACE_NORMALIZE};

/// Elements whose text is never visible content.
pub const TEXT_EXCLUDED_TAGS: &[&str] = &["script", "style", "select", "option", "textarea"];

// === Attribute Operations ===

/// Get an attribute of a single node.
#[inline]
#[must_use]
pub fn node_attr(node: &NodeRef, name: &str) -> Option<String> {
    Selection::from(*node).attr(name).map(|s| s.to_string())
}

/// The `id`, `class` and `name` values of a node, when present.
///
/// These three attributes carry the signatures the cleaner matches on.
#[must_use]
pub fn signature_attrs(node: &NodeRef) -> Vec<String> {
    ["id", "class", "name"]
        .iter()
        .filter_map(|a| node_attr(node, a))
        .filter(|v| !v.trim().is_empty())
        .collect()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(node_tag)
}

/// Tag name of a single node, lowercase. `None` for non-elements.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Whether a node is an element with the given tag.
#[inline]
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element() && node.node_name().is_some_and(|n| n.eq_ignore_ascii_case(tag))
}

// === Text Content ===

/// Visible, normalized text of a selection's first node.
///
/// Text under `script`, `style`, `select`, `option` and `textarea` is
/// skipped, entities arrive already decoded from the parser, literal
/// tag-like substrings are stripped and whitespace is collapsed. Text nodes
/// are joined with a space so adjacent blocks never fuse into one word.
#[must_use]
pub fn text_of(sel: &Selection) -> String {
    sel.nodes().first().map(node_text).unwrap_or_default()
}

/// [`text_of`] for a single node.
#[must_use]
pub fn node_text(node: &NodeRef) -> String {
    let mut raw = String::new();
    collect_visible_text(node, &mut raw);
    let stripped = TAG_LIKE.replace_all(&raw, " ");
    normalize_whitespace(&stripped)
}

fn collect_visible_text(node: &NodeRef, out: &mut String) {
    // Iterative walk, nesting depth is unbounded.
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.is_text() {
            out.push_str(&current.text());
            out.push(' ');
            continue;
        }
        if current.is_element() && is_text_excluded(&current) {
            continue;
        }
        stack.extend(current.children().into_iter().rev());
    }
}

/// Whether a node is one of [`TEXT_EXCLUDED_TAGS`].
#[must_use]
pub fn is_text_excluded(node: &NodeRef) -> bool {
    node.node_name()
        .is_some_and(|n| TEXT_EXCLUDED_TAGS.iter().any(|t| n.eq_ignore_ascii_case(t)))
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Escape text for inclusion in element content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// === Structure ===

/// Number of ancestor steps from `node` to the tree root.
///
/// Only relative comparisons between levels are meaningful.
#[must_use]
pub fn level_of(node: &NodeRef) -> usize {
    let mut level = 0;
    let mut current = node.parent();
    while let Some(parent) = current {
        level += 1;
        current = parent.parent();
    }
    level
}

/// All elements under `root` (inclusive) at absolute level `level`,
/// breadth-first, which is document order within a level.
#[must_use]
pub fn nodes_at_level<'a>(root: &NodeRef<'a>, level: usize) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut queue: VecDeque<(NodeRef<'a>, usize)> = VecDeque::new();
    queue.push_back((*root, level_of(root)));

    while let Some((node, depth)) = queue.pop_front() {
        if depth == level {
            if node.is_element() {
                out.push(node);
            }
            continue;
        }
        if depth > level {
            continue;
        }
        for child in node.children() {
            if child.is_element() {
                queue.push_back((child, depth + 1));
            }
        }
    }

    out
}

/// Element descendants of `node` (exclusive) in document order.
#[must_use]
pub fn element_descendants<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants()
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// Whether `ancestor` is a strict ancestor of `node`.
#[must_use]
pub fn is_ancestor_of(ancestor: &NodeRef, node: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id == ancestor.id {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Get previous element sibling (skipping text nodes)
#[must_use]
pub fn previous_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            return Some(s);
        }
        sibling = s.prev_sibling();
    }
    None
}

/// Up to `limit` nearest preceding element siblings sharing `node`'s tag,
/// nearest first.
#[must_use]
pub fn preceding_same_tag_siblings<'a>(node: &NodeRef<'a>, limit: usize) -> Vec<NodeRef<'a>> {
    let Some(tag) = node_tag(node) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(limit);
    let mut current = previous_element_sibling(node);
    while let Some(sibling) = current {
        if out.len() >= limit {
            break;
        }
        if is_tag(&sibling, &tag) {
            out.push(sibling);
        }
        current = previous_element_sibling(&sibling);
    }
    out
}

/// First `<body>` element of a document.
#[must_use]
pub fn body<'a>(doc: &'a Document) -> Option<NodeRef<'a>> {
    doc.select("body").nodes().first().copied()
}

/// Root `<html>` element of a document.
#[must_use]
pub fn html_root<'a>(doc: &'a Document) -> Option<NodeRef<'a>> {
    doc.select("html").nodes().first().copied()
}

// === Mutation ===

/// Remove an attribute
#[inline]
pub fn remove_attribute(sel: &Selection, name: &str) {
    sel.remove_attr(name);
}

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Remove elements but keep their children (unwrap)
#[inline]
pub fn strip_tags(sel: &Selection, tags: &[&str]) {
    sel.strip_elements(tags);
}

/// Replace element with HTML
#[inline]
pub fn replace_with_html(sel: &Selection, html: &str) {
    sel.replace_with_html(html);
}

/// Replace an element with its own children.
pub fn unwrap(sel: &Selection) {
    let inner = inner_html(sel).to_string();
    sel.replace_with_html(inner);
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
