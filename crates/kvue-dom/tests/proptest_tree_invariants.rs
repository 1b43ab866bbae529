//! Property-based invariant tests for the host node tree.
//!
//! 1. `set_text_content` then `text_content` returns the same string
//! 2. Serialized text never contains raw markup characters
//! 3. Parsed markup becomes element children that serialize back unchanged
//! 4. Tag selectors find every element with that tag, in document order
//! 5. `query_selector` agrees with the head of `query_selector_all`

use kvue_dom::{Document, Node};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

/// Flat tree: a root `div` holding one child per tag, each tagged `i`.
fn build(tags: &[&'static str]) -> (Document, Vec<Node>) {
    let root = Node::element("div");
    let mut children = Vec::new();
    for (i, tag) in tags.iter().enumerate() {
        let child = Node::element(*tag).with_attr("id", format!("n{i}"));
        root.append_child(child.clone());
        children.push(child);
    }
    (Document::with_root(root), children)
}

fn arb_tags() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::collection::vec(prop_oneof![Just("p"), Just("span"), Just("em")], 0..16)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Text round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn text_content_round_trips(text in any::<String>()) {
        let node = Node::element("p").with_child(Node::element("b").with_text("old"));
        node.set_text_content(text.clone());
        prop_assert_eq!(node.text_content(), text.clone());
        prop_assert_eq!(node.has_child_nodes(), !text.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2 + 3. Escaping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn serialized_text_is_escaped(text in any::<String>()) {
        let node = Node::element("p").with_text(text);
        let html = node.outer_html();
        let inner = &html["<p>".len()..html.len() - "</p>".len()];
        prop_assert!(!inner.contains('<'));
        prop_assert!(!inner.contains('>'));
    }

    #[test]
    fn markup_parses_into_children(
        text in "[a-z ]{1,16}",
        tag in prop_oneof![Just("b"), Just("em"), Just("span")],
    ) {
        let markup = format!("<{tag}>{text}</{tag}>");
        let node = Node::element("div").with_text("old");
        node.set_inner_html(&markup);
        let children = node.child_nodes();
        prop_assert_eq!(children.len(), 1);
        let child_tag = children[0].tag();
        prop_assert_eq!(child_tag.as_deref(), Some(tag));
        prop_assert_eq!(node.text_content(), text);
        prop_assert_eq!(node.inner_html(), markup);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4 + 5. Selectors
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tag_selector_finds_every_match(tags in arb_tags()) {
        let (doc, children) = build(&tags);
        for tag in ["p", "span", "em"] {
            let found = doc.query_selector_all(tag).unwrap();
            let expected: Vec<&Node> = children
                .iter()
                .zip(&tags)
                .filter(|(_, t)| **t == tag)
                .map(|(node, _)| node)
                .collect();
            prop_assert_eq!(found.len(), expected.len());
            for (a, b) in found.iter().zip(expected) {
                prop_assert!(a.ptr_eq(b));
            }

            let first = doc.query_selector(&format!("div {tag}")).unwrap();
            match (first, found.first()) {
                (Some(a), Some(b)) => prop_assert!(a.ptr_eq(b)),
                (None, None) => {}
                _ => prop_assert!(false, "query_selector disagrees with query_selector_all"),
            }
        }
    }

    #[test]
    fn id_selector_is_exact(tags in arb_tags(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!tags.is_empty());
        let (doc, children) = build(&tags);
        let i = pick.index(tags.len());
        let found = doc.query_selector(&format!("#n{i}")).unwrap().unwrap();
        prop_assert!(found.ptr_eq(&children[i]));
    }
}
