//! Navigation list for an outline.

use html5ever::{LocalName, Namespace, QualName};
use kuchikiki::{Attribute, ExpandedName, NodeRef};

use crate::outline::{HeadingNode, Outline};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Build `outline` as a detached nested ordered list.
///
/// Each node becomes `<li><a href="#id">title</a></li>`; a node with
/// children gets a nested `<ol>` inside the same `<li>`. With `anchor_ids`
/// the anchor also carries the node's `id`. Titles are inserted as text
/// nodes, so markup in them is escaped on serialization. Returns `None`
/// for an empty outline.
pub fn navigation_list(outline: &Outline, anchor_ids: bool) -> Option<NodeRef> {
    if outline.is_empty() {
        return None;
    }
    Some(list(outline.items(), anchor_ids))
}

fn list(nodes: &[HeadingNode], anchor_ids: bool) -> NodeRef {
    let ol = element("ol", Vec::new());
    for node in nodes {
        let mut attributes = vec![("href", node.href.clone())];
        if anchor_ids {
            attributes.push(("id", node.id.clone()));
        }
        let anchor = element("a", attributes);
        anchor.append(NodeRef::new_text(node.title.clone()));

        let item = element("li", Vec::new());
        item.append(anchor);
        if !node.children.is_empty() {
            item.append(list(&node.children, anchor_ids));
        }
        ol.append(item);
    }
    ol
}

fn element(name: &str, attributes: Vec<(&str, String)>) -> NodeRef {
    let name = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(name));
    let attributes = attributes.into_iter().map(|(local, value)| {
        (
            ExpandedName::new(Namespace::from(""), local),
            Attribute {
                prefix: None,
                value,
            },
        )
    });
    NodeRef::new_element(name, attributes)
}
