#![forbid(unsafe_code)]

//! Document root and selector queries.

use crate::error::Result;
use crate::node::Node;
use crate::selector::Selector;

/// Owner of a host node tree.
///
/// Cloning a `Document` shares the same tree.
#[derive(Clone, Debug)]
pub struct Document {
    root: Node,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::document(),
        }
    }

    /// Create a document whose single top-level child is `node`.
    #[must_use]
    pub fn with_root(node: Node) -> Self {
        let doc = Self::new();
        doc.root.append_child(node);
        doc
    }

    /// The document node itself.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Append a top-level node.
    pub fn append_child(&self, node: Node) {
        self.root.append_child(node);
    }

    /// First element matching `selectors`, or `None`.
    ///
    /// Fails only when the selector itself cannot be parsed.
    pub fn query_selector(&self, selectors: &str) -> Result<Option<Node>> {
        Ok(Selector::parse(selectors)?.first_match(&self.root))
    }

    /// All elements matching `selectors`, in document order.
    pub fn query_selector_all(&self, selectors: &str) -> Result<Vec<Node>> {
        Ok(Selector::parse(selectors)?.all_matches(&self.root))
    }

    /// Serialized tree.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.root.inner_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomError;

    #[test]
    fn query_returns_shared_handle() {
        let doc = Document::with_root(
            Node::element("div")
                .with_attr("id", "app")
                .with_child(Node::element("span")),
        );
        let span = doc.query_selector("#app span").unwrap().unwrap();
        span.set_text_content("x");
        assert_eq!(doc.to_html(), r#"<div id="app"><span>x</span></div>"#);
    }

    #[test]
    fn missing_match_is_none() {
        let doc = Document::new();
        assert!(doc.query_selector("#nope").unwrap().is_none());
        assert!(doc.query_selector_all("p").unwrap().is_empty());
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let doc = Document::new();
        let err = doc.query_selector("div > p").unwrap_err();
        assert!(matches!(err, DomError::InvalidSelector { .. }));
        assert!(err.to_string().contains("div > p"));
    }
}
