//! HTML Processing and Pruning
//!
//! The document cleaner: a fixed sequence of structural passes that strips
//! boilerplate from an extracted subtree, plus the plain-text projection of
//! the cleaned result.
//!
//! Later passes rely on earlier ones (attribute stripping runs before the
//! signature passes, figures are collapsed before caption matching, empty
//! pruning runs last), so the order in [`clean_content`] is fixed.

use dom_query::{NodeId, NodeRef, Selection};
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::dom;
use crate::patterns::{
    SignatureTables, CAPTION, DROP_CAP, GOOGLE_AD, MORE, RELATED, SOCIAL, TAG_LIKE,
};

/// Structural tags removed with their content.
const SCRIPT_TAGS: &str = "script, style";
const CHROME_TAGS: &str = "aside, nav, noscript, menu";

/// Elements that end a paragraph in the text projection.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "pre", "blockquote", "article",
    "section", "td", "tr", "ul", "ol", "table", "body",
];

// === Document Cleaning Functions ===

/// Clean a content subtree in place.
///
/// The root itself is never removed, though its attributes may be. Running
/// the cleaner twice leaves the tree as the first run did.
pub fn clean_content(root: &Selection, tables: &SignatureTables) {
    let Some(root_node) = root.nodes().first().copied() else {
        return;
    };

    strip_body_class(root, &root_node);
    strip_article_attributes(root, &root_node);
    remove_empty_emphasis(root);
    unwrap_drop_caps(root);
    root.select(SCRIPT_TAGS).remove();
    remove_boilerplate(&root_node, &tables.boilerplate);
    root.select(CHROME_TAGS).remove();
    collapse_figures(root);
    remove_by_signature(&root_node, &[&*CAPTION]);
    remove_by_signature(
        &root_node,
        &[&*GOOGLE_AD, &*MORE, &*SOCIAL, &tables.consent, &*RELATED],
    );
    dom::strip_tags(&root.select("p"), &["span"]);
    prune_empty(&root_node, tables);
}

/// Selection of the root (when it has `tag`) plus matching descendants.
fn self_and_descendants<'a>(root: &Selection<'a>, root_node: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    let mut nodes = Vec::new();
    if dom::is_tag(root_node, tag) {
        nodes.push(*root_node);
    }
    nodes.extend(root.select(tag).nodes().iter().copied());
    nodes
}

fn strip_body_class(root: &Selection, root_node: &NodeRef) {
    for node in self_and_descendants(root, root_node, "body") {
        dom::remove_attribute(&Selection::from(node), "class");
    }
}

fn strip_article_attributes(root: &Selection, root_node: &NodeRef) {
    for node in self_and_descendants(root, root_node, "article") {
        let sel = Selection::from(node);
        for attr in ["id", "class", "name"] {
            dom::remove_attribute(&sel, attr);
        }
    }
}

/// `<em>` with no text and no image inside.
fn remove_empty_emphasis(root: &Selection) {
    let empty: Vec<NodeRef> = root
        .select("em")
        .nodes()
        .iter()
        .filter(|em| dom::node_text(em).is_empty() && !Selection::from(**em).select("img").exists())
        .copied()
        .collect();
    for em in empty {
        dom::remove(&Selection::from(em));
    }
}

/// Replace drop-cap spans by their letter.
fn unwrap_drop_caps(root: &Selection) {
    let caps: Vec<NodeRef> = root
        .select("span")
        .nodes()
        .iter()
        .filter(|span| dom::node_attr(span, "class").is_some_and(|c| DROP_CAP.is_match(&c)))
        .copied()
        .collect();
    for span in caps {
        let text = dom::escape_html(&dom::node_text(&span));
        dom::replace_with_html(&Selection::from(span), &text);
    }
}

/// Whether a node's `id`, `class` or `name` matches any of `patterns`.
fn matches_signature(node: &NodeRef, patterns: &[&Regex]) -> bool {
    dom::signature_attrs(node)
        .iter()
        .any(|value| patterns.iter().any(|re| re.is_match(value)))
}

fn is_article_marked(node: &NodeRef) -> bool {
    dom::is_tag(node, "article")
        || dom::node_attr(node, "role").is_some_and(|r| r.trim().eq_ignore_ascii_case("article"))
        || dom::node_attr(node, "itemprop").is_some_and(|v| {
            v.split_whitespace()
                .any(|p| p.eq_ignore_ascii_case("articleBody") || p.eq_ignore_ascii_case("articleText"))
        })
}

/// Ids of the elements under `root` that are, or contain, article-marked
/// content. Each ancestor chain is climbed once.
fn article_holders(root: &NodeRef) -> FxHashSet<NodeId> {
    let mut holders = FxHashSet::default();
    for node in dom::element_descendants(root).iter().filter(|n| is_article_marked(n)) {
        let mut current = Some(*node);
        while let Some(n) = current {
            if n.id == root.id || !holders.insert(n.id) {
                break;
            }
            current = n.parent();
        }
    }
    holders
}

/// Outermost elements under `root` accepted by `pred`, in document order.
///
/// The subtree of an accepted element is not visited, so removing every
/// returned node never touches an already detached one.
fn outermost_matches<'a, F>(root: &NodeRef<'a>, mut pred: F) -> Vec<NodeRef<'a>>
where
    F: FnMut(&NodeRef<'a>) -> bool,
{
    let mut found = Vec::new();
    let mut stack: Vec<NodeRef<'a>> = root.children().into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if !node.is_element() {
            continue;
        }
        if pred(&node) {
            found.push(node);
        } else {
            stack.extend(node.children().into_iter().rev());
        }
    }
    found
}

fn remove_boilerplate(root: &NodeRef, boilerplate: &Regex) {
    let holders = article_holders(root);
    let matches = outermost_matches(root, |node| {
        matches_signature(node, &[boilerplate]) && !holders.contains(&node.id)
    });
    for node in matches {
        trace!(
            tag = dom::node_tag(&node).as_deref().unwrap_or(""),
            "removed boilerplate node"
        );
        dom::remove(&Selection::from(node));
    }
}

fn remove_by_signature(root: &NodeRef, patterns: &[&Regex]) {
    for node in outermost_matches(root, |node| matches_signature(node, patterns)) {
        trace!(
            tag = dom::node_tag(&node).as_deref().unwrap_or(""),
            "removed signature node"
        );
        dom::remove(&Selection::from(node));
    }
}

/// Drop captions, then replace each figure by the images it holds (or by
/// its children when it holds none). Innermost figures go first.
fn collapse_figures(root: &Selection) {
    root.select("figcaption").remove();

    let figures: Vec<NodeRef> = root.select("figure").nodes().to_vec();
    for figure in figures.into_iter().rev() {
        let sel = Selection::from(figure);
        let images = sel.select("img");
        if images.exists() {
            let html: String = images
                .nodes()
                .iter()
                .map(|img| dom::outer_html(&Selection::from(*img)).to_string())
                .collect();
            dom::replace_with_html(&sel, &html);
        } else {
            dom::unwrap(&sel);
        }
    }
}

/// Delete empty elements off the keep-list, children before parents.
///
/// Reverse document order visits every descendant before its ancestors, so
/// no visited node has been detached yet.
fn prune_empty(root: &NodeRef, tables: &SignatureTables) {
    for node in dom::element_descendants(root).into_iter().rev() {
        let tag = dom::node_tag(&node).unwrap_or_default();
        if tables.keeps(&tag) {
            continue;
        }
        let has_element_children = node.children().iter().any(NodeRef::is_element);
        if !has_element_children && dom::node_text(&node).is_empty() {
            dom::remove(&Selection::from(node));
        }
    }
}

// === Text Projection ===

#[derive(Default)]
struct TextRenderer {
    paragraphs: Vec<String>,
    lines: Vec<String>,
    current: String,
}

enum Step<'a> {
    Visit(NodeRef<'a>),
    CloseBlock,
}

impl TextRenderer {
    fn walk(&mut self, root: &NodeRef) {
        let mut stack = vec![Step::Visit(*root)];
        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Visit(node) => node,
                Step::CloseBlock => {
                    self.end_paragraph();
                    continue;
                }
            };
            if node.is_text() {
                self.current.push_str(&node.text());
                continue;
            }
            if !node.is_element() || dom::is_text_excluded(&node) {
                continue;
            }
            if dom::is_tag(&node, "br") {
                self.end_line();
                continue;
            }

            if dom::node_tag(&node).is_some_and(|t| BLOCK_TAGS.contains(&t.as_str())) {
                self.end_paragraph();
                stack.push(Step::CloseBlock);
            }
            stack.extend(node.children().into_iter().rev().map(Step::Visit));
        }
    }

    fn end_line(&mut self) {
        let stripped = TAG_LIKE.replace_all(&self.current, " ");
        let line = dom::normalize_whitespace(&stripped);
        if !line.is_empty() {
            self.lines.push(line);
        }
        self.current.clear();
    }

    fn end_paragraph(&mut self) {
        self.end_line();
        if !self.lines.is_empty() {
            self.paragraphs.push(self.lines.join("\n"));
            self.lines.clear();
        }
    }

    fn finish(mut self) -> String {
        self.end_paragraph();
        self.paragraphs.join("\n\n")
    }
}

/// Render a subtree as plain text.
///
/// Block elements end a paragraph, `<br>` ends a line, whitespace inside a
/// line is collapsed and paragraphs are separated by a blank line.
#[must_use]
pub fn render_text(node: &NodeRef) -> String {
    let mut renderer = TextRenderer::default();
    renderer.walk(node);
    renderer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn clean(html: &str) -> Document {
        let doc = Document::from(html);
        clean_content(&doc.select("body"), &SignatureTables::default());
        doc
    }

    fn body_html(doc: &Document) -> String {
        doc.select("body").inner_html().to_string()
    }

    #[test]
    fn strips_body_class_and_article_attributes() {
        let doc = clean(
            r#"<body class="home"><article id="a1" class="story" name="x" data-k="v"><p>Text</p></article></body>"#,
        );
        assert!(doc.select("body").attr("class").is_none());
        let article = doc.select("article");
        assert!(article.attr("id").is_none());
        assert!(article.attr("class").is_none());
        assert!(article.attr("name").is_none());
        assert_eq!(article.attr("data-k").as_deref(), Some("v"));
    }

    #[test]
    fn removes_empty_em_but_keeps_images() {
        let doc = clean(r#"<body><p>One <em> </em>two <em><img src="a.png"></em> <em>three</em></p></body>"#);
        assert_eq!(doc.select("em").length(), 2);
        assert!(doc.select("img").exists());
    }

    #[test]
    fn unwraps_drop_caps_keeping_the_letter() {
        let doc = clean(r#"<body><p><span class="dropcap">O</span>nce upon a time</p></body>"#);
        assert!(!doc.select("span").exists());
        assert_eq!(doc.select("p").text().to_string(), "Once upon a time");
    }

    #[test]
    fn removes_scripts_and_chrome() {
        let doc = clean(
            r#"<body><p>Text</p><script>x()</script><style>p{}</style>
            <aside>a</aside><nav>n</nav><noscript>j</noscript><menu>m</menu></body>"#,
        );
        assert_eq!(body_html(&doc).trim(), "<p>Text</p>");
    }

    #[test]
    fn boilerplate_spares_article_content() {
        let doc = clean(
            r#"<body>
                <div class="comments"><p>Spam</p></div>
                <div id="footer-wrap"><article><p>Real</p></article></div>
                <div class="sponsor-box"><div itemprop="articleBody"><p>Also real</p></div></div>
                <div class="byline">By someone</div>
            </body>"#,
        );
        let text = doc.select("body").text().to_string();
        assert!(!text.contains("Spam"));
        assert!(!text.contains("By someone"));
        assert!(text.contains("Real"));
        assert!(text.contains("Also real"));
    }

    #[test]
    fn figures_collapse_into_images() {
        let doc = clean(
            r#"<body>
                <figure><img src="a.png"><figcaption>Caption</figcaption></figure>
                <figure><p>Quote text</p></figure>
            </body>"#,
        );
        assert!(!doc.select("figure").exists());
        assert!(!doc.select("figcaption").exists());
        assert!(doc.select("body > img").exists());
        assert_eq!(doc.select("body > p").text().to_string(), "Quote text");
    }

    #[test]
    fn removes_dedicated_signatures() {
        let doc = clean(
            r#"<body>
                <p>Body text</p>
                <div class="image-caption">cap</div>
                <div id="div-gpt-ad-1">ad</div>
                <div class="read-more">more</div>
                <div id="facebook-share">share</div>
                <div class="cookie-banner">cookies</div>
                <ul class="related-articles"><li>x</li></ul>
            </body>"#,
        );
        assert_eq!(body_html(&doc).trim(), "<p>Body text</p>");
    }

    #[test]
    fn unwraps_spans_inside_paragraphs() {
        let doc = clean(r#"<body><p>Hello <span class="x">big</span> world</p><div><span>kept</span></div></body>"#);
        assert_eq!(doc.select("p").inner_html().to_string(), "Hello big world");
        assert!(doc.select("div > span").exists());
    }

    #[test]
    fn prunes_empty_nodes_deepest_first() {
        let doc = clean(
            r#"<body><div><div><span> </span></div></div><p></p><br><h2></h2><p>Text</p></body>"#,
        );
        assert!(!doc.select("div").exists());
        assert!(!doc.select("span").exists());
        assert_eq!(doc.select("p").length(), 2);
        assert!(doc.select("br").exists());
        assert!(doc.select("h2").exists());
    }

    #[test]
    fn root_is_never_removed() {
        let doc = Document::from(r#"<body><div id="root" class="comments"></div></body>"#);
        let root = doc.select("#root");
        clean_content(&root, &SignatureTables::default());
        assert!(doc.select("#root").exists());
    }

    #[test]
    fn cleaning_is_idempotent() {
        let html = r#"<body class="c">
            <article class="a"><p><span class="drop-cap">T</span>ext <em></em><span>more</span></p>
            <figure><figure><img src="i.png"></figure><figcaption>c</figcaption></figure>
            <div class="share"><div class="twitter">t</div></div><div><i></i></div></article></body>"#;
        let once = clean(html);
        let first = once.html().to_string();
        clean_content(&once.select("body"), &SignatureTables::default());
        assert_eq!(once.html().to_string(), first);
    }

    #[test]
    fn render_text_separates_blocks() {
        let doc = Document::from(
            "<body><h1>Title</h1><p>First   line<br>second line</p><ul><li>a</li><li>b</li></ul>\
             <p>Inline <b>bold</b> and <a href=\"#\">link</a>.</p><script>no()</script></body>",
        );
        let body = *doc.select("body").nodes().first().unwrap();
        assert_eq!(
            render_text(&body),
            "Title\n\nFirst line\nsecond line\n\na\n\nb\n\nInline bold and link."
        );
    }

    #[test]
    fn render_text_survives_deep_nesting() {
        let depth = 20_000;
        let html = format!(
            "<body>{}<p>one</p><p>two</p>{}</body>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let doc = Document::from(html.as_str());
        let body = *doc.select("body").nodes().first().unwrap();
        assert_eq!(render_text(&body), "one\n\ntwo");
    }

    #[test]
    fn cleaner_handles_deep_nesting() {
        let depth = 20_000;
        let html = format!(
            r#"<body>{}<div class="comments">spam</div><p>kept</p>{}</body>"#,
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let doc = clean(&html);
        assert!(!doc.select(".comments").exists());
        assert_eq!(doc.select("p").text().to_string(), "kept");
    }

    #[test]
    fn nested_boilerplate_is_removed_once() {
        let doc = clean(
            r#"<body><div class="footer"><div class="comments"><p>x</p></div></div><p>Body</p></body>"#,
        );
        assert_eq!(body_html(&doc).trim(), "<p>Body</p>");
    }

    #[test]
    fn render_text_of_empty_tree_is_empty() {
        let doc = Document::from("<body><div> </div></body>");
        let body = *doc.select("body").nodes().first().unwrap();
        assert_eq!(render_text(&body), "");
    }
}
