//! Heading tree construction.

use crate::slug::SlugAssigner;

/// Heading level at the top of the outline. `<h1>` is the page title.
pub const TOP_LEVEL: u8 = 2;

/// A scanned heading the tree builder can read and annotate.
pub trait HeadingElement {
    /// Heading level (2–6).
    fn level(&self) -> u8;

    /// Text content of the heading.
    fn text(&self) -> String;

    /// Write the assigned identifier back onto the heading.
    fn set_id(&self, id: &str);
}

/// One heading's position in the outline.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingNode {
    /// Identifier, unique within the document.
    pub id: String,
    /// Heading text captured at scan time.
    pub title: String,
    /// Link target, always `#` followed by `id`.
    pub href: String,
    /// Heading level (2–6).
    pub level: u8,
    /// Nested headings, all with a greater level.
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    fn new(id: String, title: String, level: u8, children: Vec<HeadingNode>) -> Self {
        let href = format!("#{id}");
        Self {
            id,
            title,
            href,
            level,
            children,
        }
    }
}

/// Root-level sequence of heading nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Outline {
    items: Vec<HeadingNode>,
}

impl Outline {
    /// Top-level nodes in document order.
    pub fn items(&self) -> &[HeadingNode] {
        &self.items
    }

    /// Check whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn len(&self) -> usize {
        fn count(nodes: &[HeadingNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.items)
    }
}

/// Build the outline for `headings`, assigning identifiers in document order.
///
/// Top-level nodes are the `start_level` headings. Headings deeper than
/// `start_level` that appear before the first of them belong to no scope:
/// they are left out of the outline and keep their original attributes.
/// Below the top level a heading nests under the nearest preceding heading
/// with a lower level, so skipped levels (`h2` then `h4`) still nest. Each
/// heading's identifier is reserved and written back before its
/// descendants are visited.
pub fn build_outline<H: HeadingElement>(
    headings: &[H],
    start_level: u8,
    slugs: &mut SlugAssigner<'_>,
) -> Outline {
    let mut items = Vec::new();
    let mut index = 0;

    while let Some(heading) = headings.get(index) {
        if heading.level() > start_level {
            index += 1;
            continue;
        }
        let (node, next) = build_node(headings, index, heading, slugs);
        items.push(node);
        index = next;
    }

    Outline { items }
}

/// Build the node for `heading`, found at `index`, and its descendants.
fn build_node<H: HeadingElement>(
    headings: &[H],
    index: usize,
    heading: &H,
    slugs: &mut SlugAssigner<'_>,
) -> (HeadingNode, usize) {
    let level = heading.level();
    let title = heading.text();
    let id = slugs.assign(&title);
    heading.set_id(&id);

    let (children, next) = build_scope(headings, index + 1, level, slugs);
    (HeadingNode::new(id, title, level, children), next)
}

/// Build the nodes of one scope starting at `index`.
///
/// Returns the nodes and the index of the first heading that closes the
/// scope (level at or below `parent_level`), which the caller resumes from.
fn build_scope<H: HeadingElement>(
    headings: &[H],
    mut index: usize,
    parent_level: u8,
    slugs: &mut SlugAssigner<'_>,
) -> (Vec<HeadingNode>, usize) {
    let mut nodes = Vec::new();

    while let Some(heading) = headings.get(index) {
        if heading.level() <= parent_level {
            break;
        }
        let (node, next) = build_node(headings, index, heading, slugs);
        nodes.push(node);
        index = next;
    }

    (nodes, index)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::slug::PreserveCaseSlugify;

    struct FakeHeading {
        level: u8,
        text: &'static str,
        id: RefCell<Option<String>>,
    }

    fn h(level: u8, text: &'static str) -> FakeHeading {
        FakeHeading {
            level,
            text,
            id: RefCell::new(None),
        }
    }

    impl HeadingElement for FakeHeading {
        fn level(&self) -> u8 {
            self.level
        }

        fn text(&self) -> String {
            self.text.to_owned()
        }

        fn set_id(&self, id: &str) {
            *self.id.borrow_mut() = Some(id.to_owned());
        }
    }

    fn build(headings: &[FakeHeading]) -> Outline {
        let slugify = PreserveCaseSlugify;
        let mut slugs = SlugAssigner::new(&slugify);
        build_outline(headings, TOP_LEVEL, &mut slugs)
    }

    #[test]
    fn test_empty_outline() {
        let outline = build(&[]);
        assert!(outline.is_empty());
        assert_eq!(outline.len(), 0);
    }

    #[test]
    fn test_sibling_after_child() {
        let headings = [h(2, "A"), h(3, "A.1"), h(2, "B")];
        let outline = build(&headings);

        assert_eq!(outline.items().len(), 2);
        assert_eq!(outline.items()[0].children.len(), 1);
        assert_eq!(outline.items()[0].children[0].title, "A.1");
        assert!(outline.items()[1].children.is_empty());
    }

    #[test]
    fn test_skipped_level_nests() {
        let headings = [h(2, "Top"), h(4, "Deep")];
        let outline = build(&headings);

        assert_eq!(outline.items().len(), 1);
        let top = &outline.items()[0];
        assert_eq!(top.children.len(), 1);
        assert_eq!(top.children[0].level, 4);
    }

    #[test]
    fn test_shallower_heading_closes_deeper_scope() {
        let headings = [h(2, "A"), h(4, "A.x"), h(3, "A.1"), h(5, "A.1.x")];
        let outline = build(&headings);

        let a = &outline.items()[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].title, "A.x");
        assert!(a.children[0].children.is_empty());
        assert_eq!(a.children[1].title, "A.1");
        assert_eq!(a.children[1].children[0].title, "A.1.x");
    }

    #[test]
    fn test_return_to_top_from_depth() {
        let headings = [h(2, "A"), h(3, "B"), h(4, "C"), h(5, "D"), h(2, "E")];
        let outline = build(&headings);

        assert_eq!(outline.items().len(), 2);
        assert_eq!(outline.len(), 5);
        assert_eq!(outline.items()[1].title, "E");
    }

    #[test]
    fn test_leading_deep_headings_are_left_out() {
        let headings = [h(3, "Preface"), h(4, "Aside"), h(2, "A"), h(3, "A.1")];
        let outline = build(&headings);

        assert_eq!(outline.items().len(), 1);
        assert_eq!(outline.items()[0].title, "A");
        assert_eq!(outline.items()[0].children[0].title, "A.1");
        assert_eq!(outline.len(), 2);
        assert_eq!(*headings[0].id.borrow(), None);
        assert_eq!(*headings[1].id.borrow(), None);
    }

    #[test]
    fn test_only_deep_headings_give_empty_outline() {
        let headings = [h(3, "A"), h(5, "B")];
        assert!(build(&headings).is_empty());
        assert_eq!(*headings[0].id.borrow(), None);
    }

    #[test]
    fn test_left_out_heading_does_not_reserve_id() {
        let headings = [h(3, "Dup"), h(2, "Dup")];
        build(&headings);
        assert_eq!(headings[1].id.borrow().as_deref(), Some("Dup"));
    }

    #[test]
    fn test_ids_written_back_in_document_order() {
        let headings = [h(2, "Dup"), h(3, "Dup"), h(2, "Dup")];
        let outline = build(&headings);

        assert_eq!(headings[0].id.borrow().as_deref(), Some("Dup"));
        assert_eq!(headings[1].id.borrow().as_deref(), Some("Dup-1"));
        assert_eq!(headings[2].id.borrow().as_deref(), Some("Dup-2"));
        assert_eq!(outline.items()[1].href, "#Dup-2");
    }
}
