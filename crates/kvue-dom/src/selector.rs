#![forbid(unsafe_code)]

//! A small CSS selector subset used to locate the compile root.
//!
//! Supported grammar: whitespace-separated compounds (descendant
//! combinator), each compound being an optional tag name or `*` followed by
//! any number of `#id` and `.class` parts. Anything else is rejected with
//! [`DomError::InvalidSelector`].
//!
//! Matching walks the tree in document order (pre-order) and never includes
//! the scope node itself, matching `querySelector` semantics.

use crate::error::{DomError, Result};
use crate::node::{Node, NodeType};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        if node.node_type() != NodeType::Element {
            return false;
        }
        if let Some(tag) = &self.tag {
            match node.tag() {
                Some(actual) if actual.eq_ignore_ascii_case(tag) => {}
                _ => return false,
            }
        }
        if let Some(id) = &self.id {
            if node.get_attribute("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = node.get_attribute("class").unwrap_or_default();
            let has_all = self
                .classes
                .iter()
                .all(|class| class_attr.split_ascii_whitespace().any(|c| c == class));
            if !has_all {
                return false;
            }
        }
        true
    }
}

/// A parsed selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// Outermost ancestor first, subject last.
    compounds: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(source: &str) -> Result<Self> {
        let mut compounds = Vec::new();
        for token in source.split_ascii_whitespace() {
            compounds.push(parse_compound(source, token)?);
        }
        if compounds.is_empty() {
            return Err(DomError::invalid_selector(source, "empty selector"));
        }
        Ok(Self { compounds })
    }

    /// Whether `node` matches, given its ancestors (nearest last).
    #[must_use]
    pub fn matches(&self, node: &Node, ancestors: &[Node]) -> bool {
        let Some((subject, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(node) {
            return false;
        }
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            match remaining.peek() {
                Some(compound) if compound.matches(ancestor) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }

    /// First matching descendant of `scope`, in document order.
    #[must_use]
    pub fn first_match(&self, scope: &Node) -> Option<Node> {
        let mut found = None;
        self.walk(scope, &mut Vec::new(), &mut |node: &Node| {
            found = Some(node.clone());
            false
        });
        found
    }

    /// Every matching descendant of `scope`, in document order.
    #[must_use]
    pub fn all_matches(&self, scope: &Node) -> Vec<Node> {
        let mut found = Vec::new();
        self.walk(scope, &mut Vec::new(), &mut |node: &Node| {
            found.push(node.clone());
            true
        });
        found
    }

    /// Pre-order walk; `visit` returns `false` to stop.
    fn walk(
        &self,
        parent: &Node,
        ancestors: &mut Vec<Node>,
        visit: &mut dyn FnMut(&Node) -> bool,
    ) -> bool {
        ancestors.push(parent.clone());
        for child in parent.child_nodes() {
            if self.matches(&child, ancestors) && !visit(&child) {
                ancestors.pop();
                return false;
            }
            if !self.walk(&child, ancestors, visit) {
                ancestors.pop();
                return false;
            }
        }
        ancestors.pop();
        true
    }
}

fn parse_compound(source: &str, token: &str) -> Result<Compound> {
    let mut compound = Compound::default();
    let mut chars = token.char_indices().peekable();

    match chars.peek().map(|&(_, c)| c) {
        Some('*') => {
            chars.next();
        }
        Some(c) if is_ident_char(c) => {
            let ident = take_ident(token, &mut chars);
            compound.tag = Some(ident.to_string());
        }
        _ => {}
    }

    while let Some((_, sigil)) = chars.next() {
        let ident = take_ident(token, &mut chars);
        if ident.is_empty() {
            return Err(DomError::invalid_selector(source, "expected identifier"));
        }
        match sigil {
            '#' => {
                if compound.id.is_some() {
                    return Err(DomError::invalid_selector(source, "duplicate id"));
                }
                compound.id = Some(ident.to_string());
            }
            '.' => compound.classes.push(ident.to_string()),
            _ => return Err(DomError::invalid_selector(source, "unsupported syntax")),
        }
    }
    Ok(compound)
}

fn take_ident<'a>(
    token: &'a str,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'a>>,
) -> &'a str {
    let Some(&(start, _)) = chars.peek() else {
        return "";
    };
    let mut end = start;
    while let Some(&(idx, c)) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        end = idx + c.len_utf8();
        chars.next();
    }
    &token[start..end]
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        let root = Node::element("main");
        root.append_child(
            Node::element("div")
                .with_attr("id", "app")
                .with_attr("class", "shell dark")
                .with_child(Node::element("p").with_attr("class", "lead").with_text("a"))
                .with_child(Node::element("p").with_text("b")),
        );
        root.append_child(Node::element("p").with_attr("class", "lead").with_text("c"));
        root
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("   ").is_err());
        assert!(Selector::parse("div > p").is_err());
        assert!(Selector::parse("#").is_err());
        assert!(Selector::parse("#a#b").is_err());
        assert!(Selector::parse("[data-x]").is_err());
    }

    #[test]
    fn id_selector_finds_element() {
        let root = tree();
        let found = Selector::parse("#app").unwrap().first_match(&root).unwrap();
        assert_eq!(found.get_attribute("id").as_deref(), Some("app"));
    }

    #[test]
    fn tag_and_class_compound() {
        let root = tree();
        let all = Selector::parse("p.lead").unwrap().all_matches(&root);
        let texts: Vec<_> = all.iter().map(Node::text_content).collect();
        assert_eq!(texts, ["a", "c"]);

        let dark = Selector::parse("div.dark.shell").unwrap().first_match(&root);
        assert!(dark.is_some());
        assert!(Selector::parse("div.light").unwrap().first_match(&root).is_none());
    }

    #[test]
    fn descendant_combinator() {
        let root = tree();
        let inner = Selector::parse("#app p").unwrap().all_matches(&root);
        let texts: Vec<_> = inner.iter().map(Node::text_content).collect();
        assert_eq!(texts, ["a", "b"]);
    }

    #[test]
    fn scope_itself_is_excluded() {
        let root = tree();
        assert!(Selector::parse("main").unwrap().first_match(&root).is_none());
        assert_eq!(Selector::parse("*").unwrap().all_matches(&root).len(), 4);
    }
}
