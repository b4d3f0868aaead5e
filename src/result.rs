//! Result types for extraction output.
//!
//! This module defines the detached content node handed back to callers and
//! the summary statistics of a single extraction pass.

use std::fmt;

use dom_query::{Document, Selection};
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::html_processing::render_text;

/// Detached, owned main-content subtree.
///
/// Built from serialized clones, so it never shares nodes with the source
/// document. The cleaner mutates it in place.
pub struct ContentNode {
    document: Document,
    root: Root,
}

/// Where the content root sits in the reparsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Root {
    Body,
    FirstChild,
    FirstOfTag(String),
}

/// Markup that table parts need around them to survive parsing.
fn table_context(tag: &str) -> Option<(&'static str, &'static str)> {
    match tag {
        "td" | "th" => Some(("<table><tbody><tr>", "</tr></tbody></table>")),
        "tr" => Some(("<table><tbody>", "</tbody></table>")),
        "tbody" | "thead" | "tfoot" | "caption" => Some(("<table>", "</table>")),
        _ => None,
    }
}

impl ContentNode {
    /// Parse `html` into a fresh content node.
    ///
    /// When `root_is_body` is false, the root is the first element inside
    /// the parsed `<body>`.
    #[must_use]
    pub fn from_html(html: &str, root_is_body: bool) -> Self {
        Self {
            document: Document::from(html),
            root: if root_is_body { Root::Body } else { Root::FirstChild },
        }
    }

    /// Parse the outer HTML of a single `tag` element.
    ///
    /// Table parts are reparsed inside a table so the element is kept
    /// instead of being dropped by the parser along with its structure.
    #[must_use]
    pub fn from_element_html(html: &str, tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("body") {
            return Self::from_html(html, true);
        }
        let tag = tag.to_ascii_lowercase();
        match table_context(&tag) {
            Some((open, close)) => Self {
                document: Document::from(format!("{open}{html}{close}")),
                root: Root::FirstOfTag(tag),
            },
            None => Self::from_html(html, false),
        }
    }

    /// The document owning the content subtree.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Selection holding the content root.
    #[must_use]
    pub fn root(&self) -> Selection<'_> {
        let body = self.document.select("body");
        let found = match &self.root {
            Root::Body => None,
            Root::FirstChild => body
                .nodes()
                .first()
                .and_then(|b| b.children().into_iter().find(|c| c.is_element())),
            Root::FirstOfTag(tag) => self.document.select(tag).nodes().first().copied(),
        };
        found.map_or(body, Selection::from)
    }

    /// Lowercase tag name of the content root.
    #[must_use]
    pub fn tag(&self) -> String {
        dom::tag_name(&self.root()).unwrap_or_default()
    }

    /// Outer HTML of the content root.
    #[must_use]
    pub fn html(&self) -> String {
        dom::outer_html(&self.root()).to_string()
    }

    /// Plain-text projection: one paragraph per block, separated by a
    /// blank line.
    #[must_use]
    pub fn text(&self) -> String {
        self.root().nodes().first().map(render_text).unwrap_or_default()
    }
}

impl fmt::Debug for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNode")
            .field("tag", &self.tag())
            .field("html_len", &self.html().len())
            .finish()
    }
}

/// Summary of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Candidates found by discovery.
    pub candidates_discovered: usize,
    /// Candidates that survived feature filtering.
    pub candidates_retained: usize,
    /// Nodes that received at least one score contribution.
    pub parent_pool_size: usize,
    /// Tag of the best node, if one was found.
    pub best_tag: Option<String>,
    /// Gravity score of the best node.
    pub best_score: f64,
    /// Whether `<body>` was used because no container scored.
    pub body_fallback: bool,
    /// Whether same-level siblings were considered.
    pub complemented: bool,
}

/// Result of content extraction from an HTML document.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Main content node, `None` when the document has no `<body>`.
    pub content: Option<ContentNode>,

    /// Main content as plain text (empty when there is no content).
    pub text: String,

    /// Diagnostics about the pass.
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Outer HTML of the content node, if any.
    #[must_use]
    pub fn html(&self) -> Option<String> {
        self.content.as_ref().map(ContentNode::html)
    }

    /// Whether any text was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_first_element_inside_body() {
        let node = ContentNode::from_html("<div id=\"x\"><p>Hello</p></div>", false);
        assert_eq!(node.tag(), "div");
        assert_eq!(node.html(), r#"<div id="x"><p>Hello</p></div>"#);
    }

    #[test]
    fn body_root() {
        let node = ContentNode::from_html("<body class=\"c\"><p>Hi</p></body>", true);
        assert_eq!(node.tag(), "body");
        assert!(node.html().starts_with("<body"));
        assert_eq!(node.text(), "Hi");
    }

    #[test]
    fn table_cell_keeps_all_its_children() {
        let node = ContentNode::from_element_html(
            r#"<td class="cell"><p>One</p><p>Two</p><p>Three</p></td>"#,
            "td",
        );
        assert_eq!(node.tag(), "td");
        assert_eq!(node.root().select("p").length(), 3);
        assert_eq!(node.text(), "One\n\nTwo\n\nThree");
    }

    #[test]
    fn table_row_is_reparsed_in_context() {
        let node = ContentNode::from_element_html("<tr><td>a</td><td>b</td></tr>", "tr");
        assert_eq!(node.tag(), "tr");
        assert_eq!(node.root().select("td").length(), 2);
    }

    #[test]
    fn element_html_for_ordinary_tags() {
        let node = ContentNode::from_element_html("<article><p>A</p><p>B</p></article>", "article");
        assert_eq!(node.tag(), "article");
        assert_eq!(node.root().select("p").length(), 2);
    }

    #[test]
    fn empty_content_falls_back_to_body() {
        let node = ContentNode::from_html("", false);
        assert_eq!(node.tag(), "body");
        assert_eq!(node.text(), "");
    }

    #[test]
    fn stats_serialize() {
        let stats = ExtractionStats {
            candidates_discovered: 3,
            best_tag: Some("div".into()),
            ..ExtractionStats::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["candidates_discovered"], 3);
        assert_eq!(json["best_tag"], "div");
        assert_eq!(json["body_fallback"], false);
    }
}
