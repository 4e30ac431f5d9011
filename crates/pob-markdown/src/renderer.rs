//! Markdown to HTML with event rewriting.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::code_block::render_code_block;
use crate::languages::CodeLanguages;
use crate::state::{CodeBlockState, LinkState};

/// Check whether a link target points off-site.
///
/// # Examples
///
/// ```
/// use pob_markdown::is_external_link;
///
/// assert!(is_external_link("https://example.com"));
/// assert!(!is_external_link("/about/"));
/// ```
pub fn is_external_link(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Markdown renderer that tracks code languages across pages.
pub struct MarkdownRenderer {
    options: Options,
    languages: CodeLanguages,
}

impl MarkdownRenderer {
    /// Create a renderer with tables, footnotes and strikethrough enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH,
            languages: CodeLanguages::new(),
        }
    }

    /// Languages recorded so far.
    pub fn languages(&self) -> &CodeLanguages {
        &self.languages
    }

    /// Render `source` to HTML.
    ///
    /// `page` is the page's input path; code languages are recorded
    /// against it when present.
    pub fn render(&mut self, source: &str, page: Option<&str>) -> String {
        let parser = Parser::new_ext(source, self.options);
        let mut code = CodeBlockState::default();
        let mut links = LinkState::default();
        let mut events = Vec::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    code.start(&info);
                }
                Event::Text(text) if code.is_active() => code.push_str(&text),
                Event::End(TagEnd::CodeBlock) if code.is_active() => {
                    let (info, content) = code.end();
                    let (language, markup) = render_code_block(&info, &content);
                    if let Some(page) = page {
                        self.languages.record(page, &language);
                    }
                    events.push(Event::Html(markup.into()));
                }
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) if is_external_link(&dest_url) => {
                    links.open(true);
                    events.push(Event::Html(external_link_open(&dest_url, &title)));
                }
                Event::Start(tag @ Tag::Link { .. }) => {
                    links.open(false);
                    events.push(Event::Start(tag));
                }
                Event::End(TagEnd::Link) => {
                    if links.close() {
                        events.push(Event::Html("</a>".into()));
                    } else {
                        events.push(Event::End(TagEnd::Link));
                    }
                }
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        if let Some(page) = page {
            tracing::debug!(page, bytes = out.len(), "Rendered markdown");
        }
        out
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Opening tag for a link that opens in a new tab.
fn external_link_open(href: &str, title: &str) -> CowStr<'static> {
    let mut tag = format!(r#"<a href="{}""#, escape_attr(href));
    if !title.is_empty() {
        let _ = write!(tag, r#" title="{}""#, escape_attr(title));
    }
    tag.push_str(r#" target="_blank" rel="noopener noreferrer">"#);
    tag.into()
}

fn escape_attr(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
