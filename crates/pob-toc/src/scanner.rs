//! Heading scanner over a parsed document.

use kuchikiki::{ElementData, NodeDataRef, NodeRef};

use crate::error::TocError;
use crate::outline::HeadingElement;

/// Selector for the headings that belong in the outline.
pub(crate) const HEADING_SELECTOR: &str = "h2, h3, h4, h5, h6";

/// A heading element found in the document.
pub(crate) struct DomHeading {
    element: NodeDataRef<ElementData>,
    level: u8,
}

impl DomHeading {
    fn from_element(element: NodeDataRef<ElementData>) -> Option<Self> {
        let level = heading_level(&element.name.local)?;
        Some(Self { element, level })
    }
}

impl HeadingElement for DomHeading {
    fn level(&self) -> u8 {
        self.level
    }

    fn text(&self) -> String {
        self.element.as_node().text_contents()
    }

    fn set_id(&self, id: &str) {
        self.element
            .attributes
            .borrow_mut()
            .insert("id", id.to_owned());
    }
}

/// Parse a heading tag name (`h2`–`h6`) into its level.
fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Collect the `h2`–`h6` elements under `root` in document order.
///
/// Traversal is depth-first pre-order and includes `root` itself.
pub(crate) fn scan_headings(root: &NodeRef) -> Result<Vec<DomHeading>, TocError> {
    let selected = root
        .select(HEADING_SELECTOR)
        .map_err(|()| TocError::InvalidSelector(HEADING_SELECTOR.to_owned()))?;
    Ok(selected.filter_map(DomHeading::from_element).collect())
}
