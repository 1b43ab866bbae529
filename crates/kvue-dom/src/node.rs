#![forbid(unsafe_code)]

//! Shared, mutable host nodes.
//!
//! A [`Node`] is a cheap handle (`Rc<RefCell<..>>`) to one node of the tree.
//! Cloning a handle never copies the node: every clone observes the same
//! content, which is what lets a binding hold on to "its" node and update it
//! long after the compile pass finished.
//!
//! # Invariants
//!
//! 1. Only element and document nodes carry children and attributes.
//! 2. Attribute order is insertion order; setting an existing attribute
//!    replaces its value in place.
//! 3. `set_text_content` on a container replaces every child with at most one
//!    text node. `set_inner_html` replaces every child with the nodes parsed
//!    from the markup, so injected elements are ordinary, walkable children.
//! 4. Text and attribute values are HTML-escaped on serialization. Entities
//!    in parsed markup are decoded once, on the way in.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use scraper::{ElementRef, Html};

/// Elements that never carry children or a closing tag when serialized.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Classification of a node, mirroring the DOM `nodeType` families the
/// compiler cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// An element with a tag, attributes and children.
    Element,
    /// A plain text node.
    Text,
    /// A comment; never compiled and excluded from text content.
    Comment,
    /// The document root.
    Document,
}

/// A single `name="value"` attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    },
    Text(String),
    Comment(String),
    Document {
        children: Vec<Node>,
    },
}

/// Handle to a node of the host tree.
#[derive(Clone)]
pub struct Node {
    inner: Rc<RefCell<NodeData>>,
}

impl Node {
    fn from_data(data: NodeData) -> Self {
        Self {
            inner: Rc::new(RefCell::new(data)),
        }
    }

    /// Create an element with no attributes and no children.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self::from_data(NodeData::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Create a text node.
    #[must_use]
    pub fn text(data: impl Into<String>) -> Self {
        Self::from_data(NodeData::Text(data.into()))
    }

    /// Create a comment node.
    #[must_use]
    pub fn comment(data: impl Into<String>) -> Self {
        Self::from_data(NodeData::Comment(data.into()))
    }

    pub(crate) fn document() -> Self {
        Self::from_data(NodeData::Document {
            children: Vec::new(),
        })
    }

    /// Builder: set an attribute and return the node.
    #[must_use]
    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: append a child and return the node.
    #[must_use]
    pub fn with_child(self, child: Node) -> Self {
        self.append_child(child);
        self
    }

    /// Builder: append a text child and return the node.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.append_child(Node::text(text));
        self
    }

    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match &*self.inner.borrow() {
            NodeData::Element { .. } => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::Document { .. } => NodeType::Document,
        }
    }

    /// DOM-style node name: the upper-cased tag for elements, `#text`,
    /// `#comment` or `#document` otherwise.
    #[must_use]
    pub fn node_name(&self) -> String {
        match &*self.inner.borrow() {
            NodeData::Element { tag, .. } => tag.to_ascii_uppercase(),
            NodeData::Text(_) => "#text".to_string(),
            NodeData::Comment(_) => "#comment".to_string(),
            NodeData::Document { .. } => "#document".to_string(),
        }
    }

    /// Tag name as written, for elements.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        match &*self.inner.borrow() {
            NodeData::Element { tag, .. } => Some(tag.clone()),
            _ => None,
        }
    }

    /// Snapshot of the attribute list, in order.
    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        match &*self.inner.borrow() {
            NodeData::Element { attributes, .. } => attributes.clone(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        match &*self.inner.borrow() {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.clone()),
            _ => None,
        }
    }

    /// Set an attribute. Ignored on non-element nodes.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        if let NodeData::Element { attributes, .. } = &mut *self.inner.borrow_mut() {
            let name = name.into();
            let value = value.into();
            match attributes.iter_mut().find(|attr| attr.name == name) {
                Some(existing) => existing.value = value,
                None => attributes.push(Attribute { name, value }),
            }
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        match &mut *self.inner.borrow_mut() {
            NodeData::Element { attributes, .. } => {
                let idx = attributes.iter().position(|attr| attr.name == name)?;
                Some(attributes.remove(idx).value)
            }
            _ => None,
        }
    }

    /// Snapshot of the children. Later mutations of this node do not affect
    /// the returned list.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Node> {
        match &*self.inner.borrow() {
            NodeData::Element { children, .. } | NodeData::Document { children } => {
                children.clone()
            }
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn has_child_nodes(&self) -> bool {
        match &*self.inner.borrow() {
            NodeData::Element { children, .. } | NodeData::Document { children } => {
                !children.is_empty()
            }
            _ => false,
        }
    }

    /// Append a child. Ignored on leaf nodes.
    pub fn append_child(&self, child: Node) {
        if let NodeData::Element { children, .. } | NodeData::Document { children } =
            &mut *self.inner.borrow_mut()
        {
            children.push(child);
        }
    }

    /// Concatenated text of this node and its descendants. Comments below
    /// the node are skipped.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, true);
        out
    }

    fn collect_text(&self, out: &mut String, is_root: bool) {
        match &*self.inner.borrow() {
            NodeData::Element { children, .. } | NodeData::Document { children } => {
                for child in children {
                    child.collect_text(out, false);
                }
            }
            NodeData::Text(data) => out.push_str(data),
            NodeData::Comment(data) => {
                if is_root {
                    out.push_str(data);
                }
            }
        }
    }

    /// Replace the plain text of this node.
    ///
    /// On containers all children are replaced by a single text node (none
    /// when `text` is empty).
    pub fn set_text_content(&self, text: impl Into<String>) {
        let text = text.into();
        match &mut *self.inner.borrow_mut() {
            NodeData::Element { children, .. } | NodeData::Document { children } => {
                children.clear();
                if !text.is_empty() {
                    children.push(Node::text(text));
                }
            }
            NodeData::Text(data) | NodeData::Comment(data) => {
                *data = text;
            }
        }
    }

    /// Serialized children of a container node.
    #[must_use]
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        match &*self.inner.borrow() {
            NodeData::Element { children, .. } | NodeData::Document { children } => {
                for child in children {
                    child.write_html(&mut out);
                }
            }
            NodeData::Text(_) | NodeData::Comment(_) => {}
        }
        out
    }

    /// Replace the children of a container with the nodes parsed from
    /// `markup`, read as an HTML fragment in body context.
    ///
    /// The markup is not sanitized. Leaf nodes are left untouched.
    pub fn set_inner_html(&self, markup: impl AsRef<str>) {
        if let NodeData::Element { children, .. } | NodeData::Document { children } =
            &mut *self.inner.borrow_mut()
        {
            *children = parse_fragment(markup.as_ref());
        }
    }

    /// Serialize this node including its own tag.
    #[must_use]
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match &*self.inner.borrow() {
            NodeData::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for attr in attributes {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&v_htmlescape::escape(&attr.value).to_string());
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str()) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            NodeData::Document { children } => {
                for child in children {
                    child.write_html(out);
                }
            }
            NodeData::Text(data) => out.push_str(&v_htmlescape::escape(data).to_string()),
            NodeData::Comment(data) => {
                out.push_str("<!--");
                out.push_str(data);
                out.push_str("-->");
            }
        }
    }

    /// Whether two handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner.borrow() {
            NodeData::Element {
                tag, attributes, ..
            } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attributes", attributes)
                .finish_non_exhaustive(),
            NodeData::Text(data) => f.debug_tuple("Text").field(data).finish(),
            NodeData::Comment(data) => f.debug_tuple("Comment").field(data).finish(),
            NodeData::Document { children } => f
                .debug_struct("Document")
                .field("children", &children.len())
                .finish(),
        }
    }
}

fn parse_fragment(markup: &str) -> Vec<Node> {
    if markup.is_empty() {
        return Vec::new();
    }
    // Fragments parse under a synthetic `<html>` root; its children are ours.
    let fragment = Html::parse_fragment(markup);
    convert_children(fragment.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    parent
        .children()
        .filter_map(|child| {
            if let Some(element) = ElementRef::wrap(child) {
                let value = element.value();
                let node = Node::element(value.name());
                for (name, attr) in value.attrs() {
                    node.set_attribute(name, attr);
                }
                for grandchild in convert_children(element) {
                    node.append_child(grandchild);
                }
                return Some(node);
            }
            match child.value() {
                scraper::Node::Text(text) => Some(Node::text(&*text.text)),
                scraper::Node::Comment(comment) => Some(Node::comment(&*comment.comment)),
                _ => None,
            }
        })
        .collect()
}
