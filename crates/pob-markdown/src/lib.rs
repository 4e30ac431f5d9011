//! Markdown rendering for site pages.
//!
//! Wraps pulldown-cmark and rewrites two kinds of events before HTML
//! output:
//!
//! - fenced code blocks become `<syntax-highlight language="…">` elements,
//!   wrapped in `<pob-demo>` when the info string carries the `live` flag
//! - links to `http://` and `https://` URLs open in a new tab
//!
//! The languages used by each page are recorded in [`CodeLanguages`] so
//! a layout can load only the grammars a page needs.
//!
//! # Example
//!
//! ```
//! use pob_markdown::MarkdownRenderer;
//!
//! let mut renderer = MarkdownRenderer::new();
//! let html = renderer.render("```py\nprint('hi')\n```", Some("posts/hello.md"));
//!
//! assert!(html.contains(r#"<syntax-highlight language="python">"#));
//! assert_eq!(
//!     renderer.languages().languages_for("posts/hello.md"),
//!     vec!["markup", "css", "javascript", "python"],
//! );
//! ```

mod code_block;
mod languages;
mod renderer;
mod state;

pub use code_block::{escape_code, map_language, render_code_block};
pub use languages::{BASE_LANGUAGES, CodeLanguages};
pub use renderer::{MarkdownRenderer, is_external_link};
