//! The `(content, output path) -> content` transform.

use kuchikiki::{ElementData, NodeDataRef, NodeRef};
use kuchikiki::traits::TendrilSink;

use crate::error::TocError;
use crate::outline::{Outline, TOP_LEVEL, build_outline};
use crate::render::navigation_list;
use crate::scanner::{DomHeading, scan_headings};
use crate::slug::{PreserveCaseSlugify, SlugAssigner, Slugify};

/// Where headings are collected from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeadingScope {
    /// Only headings inside the mount-point element.
    #[default]
    MountPoint,
    /// Every heading in the document. Suits an empty `<nav>` mount point.
    Document,
}

/// Table-of-contents options.
#[derive(Clone, Debug)]
pub struct TocOptions {
    /// CSS selector of the mount point. The first match receives the list.
    pub parent: String,
    /// Which part of the document is scanned for headings.
    pub scope: HeadingScope,
    /// Whether generated anchors also carry the heading's `id`.
    pub anchor_ids: bool,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            parent: "body".to_owned(),
            scope: HeadingScope::default(),
            anchor_ids: true,
        }
    }
}

/// Table-of-contents transform for rendered pages.
///
/// Holds no per-document state; each [`apply`](Self::apply) call creates
/// its own identifier registry, so one instance can serve many documents.
pub struct TableOfContents {
    options: TocOptions,
    slugify: Box<dyn Slugify + Send + Sync>,
}

impl TableOfContents {
    /// Create a transform using [`PreserveCaseSlugify`].
    #[must_use]
    pub fn new(options: TocOptions) -> Self {
        Self {
            options,
            slugify: Box::new(PreserveCaseSlugify),
        }
    }

    /// Use a host-supplied slug function.
    #[must_use]
    pub fn with_slugify(mut self, slugify: impl Slugify + Send + Sync + 'static) -> Self {
        self.slugify = Box::new(slugify);
        self
    }

    /// Options this transform was created with.
    pub fn options(&self) -> &TocOptions {
        &self.options
    }

    /// Check whether the transform applies to `output_path`.
    ///
    /// Only `.html` outputs are transformed. A missing path means the
    /// content is not bound to a file and is always transformed.
    pub fn applies_to(output_path: Option<&str>) -> bool {
        output_path.is_none_or(|path| path.ends_with(".html"))
    }

    /// Transform one rendered document.
    ///
    /// Returns `content` unchanged when the output path is not HTML or the
    /// mount point is absent. When no headings are found the mount point is
    /// removed. Otherwise headings receive `id` attributes and the
    /// navigation list becomes the mount point's last child.
    pub fn apply(&self, content: &str, output_path: Option<&str>) -> Result<String, TocError> {
        if !Self::applies_to(output_path) {
            return Ok(content.to_owned());
        }

        let document = kuchikiki::parse_html().one(content);
        let Some(mount) = self.mount_point(&document)? else {
            tracing::debug!(parent = %self.options.parent, "Mount point not found");
            return Ok(content.to_owned());
        };
        let headings = self.scan(&document, &mount)?;

        let mut slugs = SlugAssigner::new(self.slugify.as_ref());
        let outline = build_outline(&headings, TOP_LEVEL, &mut slugs);

        match navigation_list(&outline, self.options.anchor_ids) {
            Some(list) => {
                tracing::debug!(headings = outline.len(), "Inserting table of contents");
                mount.as_node().append(list);
            }
            None => {
                tracing::debug!(parent = %self.options.parent, "No headings, removing mount point");
                mount.as_node().detach();
            }
        }

        serialize(&document)
    }

    /// Build the outline of `content` without modifying it.
    ///
    /// Returns `None` when the mount point is absent.
    pub fn outline(&self, content: &str) -> Result<Option<Outline>, TocError> {
        let document = kuchikiki::parse_html().one(content);
        let Some(mount) = self.mount_point(&document)? else {
            return Ok(None);
        };
        let headings = self.scan(&document, &mount)?;
        let mut slugs = SlugAssigner::new(self.slugify.as_ref());
        Ok(Some(build_outline(&headings, TOP_LEVEL, &mut slugs)))
    }

    /// First element matching the mount-point locator.
    fn mount_point(
        &self,
        document: &NodeRef,
    ) -> Result<Option<NodeDataRef<ElementData>>, TocError> {
        let mut matches = document
            .select(&self.options.parent)
            .map_err(|()| TocError::InvalidSelector(self.options.parent.clone()))?;
        Ok(matches.next())
    }

    fn scan(
        &self,
        document: &NodeRef,
        mount: &NodeDataRef<ElementData>,
    ) -> Result<Vec<DomHeading>, TocError> {
        match self.options.scope {
            HeadingScope::MountPoint => scan_headings(mount.as_node()),
            HeadingScope::Document => scan_headings(document),
        }
    }
}

impl Default for TableOfContents {
    fn default() -> Self {
        Self::new(TocOptions::default())
    }
}

fn serialize(document: &NodeRef) -> Result<String, TocError> {
    let mut buf = Vec::new();
    document.serialize(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}
