//! Table-of-contents generation for rendered HTML pages.
//!
//! The crate exposes a single build-time transform, [`TableOfContents`],
//! with the signature `(content, output path) -> content`. It scans the
//! `h2`–`h6` headings of a rendered page, gives each one a unique `id`,
//! and inserts a nested `<ol>` of links into a mount-point element.
//!
//! # Architecture
//!
//! - `scanner`: locates headings in document order
//! - [`Outline`]: the nested heading tree built from the flat scan
//! - [`Slugify`] / [`IdRegistry`]: identifier derivation and uniqueness
//! - [`navigation_list`]: nested list nodes mirroring the outline
//!
//! The tree builder and the slug assigner run interleaved: identifiers are
//! committed in document order while the tree is built, so later headings
//! with the same text always see earlier assignments.
//!
//! # Example
//!
//! ```
//! use pob_toc::{TableOfContents, TocOptions};
//!
//! let toc = TableOfContents::new(TocOptions::default());
//! let html = toc
//!     .apply("<body><h2>Intro</h2><h2>Usage</h2></body>", Some("index.html"))
//!     .unwrap();
//!
//! assert!(html.contains(r#"<h2 id="Intro">Intro</h2>"#));
//! assert!(html.contains(r##"<a href="#Usage" id="Usage">Usage</a>"##));
//! ```

mod error;
mod outline;
mod render;
mod scanner;
mod slug;
mod transform;

pub use error::TocError;
pub use outline::{HeadingElement, HeadingNode, Outline, TOP_LEVEL, build_outline};
pub use render::navigation_list;
pub use slug::{IdRegistry, LowercaseSlugify, PreserveCaseSlugify, SlugAssigner, Slugify};
pub use transform::{HeadingScope, TableOfContents, TocOptions};
