//! RSS 2.0 / RSS 1.0 / Atom parsing over quick-xml events.

use kuchikiki::traits::{NodeIterator, TendrilSink};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::FeedError;
use crate::feed::{Feed, FeedEntry};

/// Parse an RSS or Atom document.
///
/// Unknown elements are ignored. The root element decides the format:
/// `rss` or `rdf:RDF` for RSS, `feed` for Atom.
pub fn parse_feed(xml: &str) -> Result<Feed, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut state = ParseState::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = decode_name(&reader, e.name().as_ref());
                let href = link_href(&e);
                state.open(name, href)?;
            }
            Event::Empty(e) => {
                let name = decode_name(&reader, e.name().as_ref());
                let href = link_href(&e);
                state.open(name, href)?;
                state.close();
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                state.text.push_str(&text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                state.text.push_str(&decode_entity(&entity));
            }
            Event::CData(e) => {
                state.text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::End(_) => state.close(),
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }

    if state.root.is_none() {
        return Err(FeedError::UnknownFormat("empty document".to_owned()));
    }
    Ok(state.feed)
}

#[derive(Default)]
struct ParseState {
    root: Option<String>,
    path: Vec<String>,
    text: String,
    feed: Feed,
    entry: Option<FeedEntry>,
}

impl ParseState {
    fn open(&mut self, name: String, href: Option<String>) -> Result<(), FeedError> {
        if self.root.is_none() {
            if !matches!(name.as_str(), "rss" | "rdf:RDF" | "feed") {
                return Err(FeedError::UnknownFormat(name));
            }
            self.root = Some(name.clone());
        }

        if matches!(name.as_str(), "item" | "entry") {
            self.entry = Some(FeedEntry::default());
        }
        if name == "link"
            && let Some(href) = href
        {
            match self.entry.as_mut() {
                Some(entry) => {
                    entry.link.get_or_insert(href);
                }
                None if self.path.last().is_some_and(|p| p == "feed") => {
                    self.feed.link.get_or_insert(href);
                }
                None => {}
            }
        }

        self.path.push(name);
        self.text.clear();
        Ok(())
    }

    fn close(&mut self) {
        let Some(name) = self.path.pop() else {
            return;
        };
        let text = std::mem::take(&mut self.text);
        let value = text.trim();

        if matches!(name.as_str(), "item" | "entry") {
            if let Some(entry) = self.entry.take() {
                self.feed.entries.push(entry);
            }
            return;
        }
        if value.is_empty() {
            return;
        }

        let parent = self.path.last().map(String::as_str);
        let value = value.to_owned();
        match self.entry.as_mut() {
            Some(entry) => entry_field(entry, &name, parent, value),
            None => feed_field(&mut self.feed, &name, parent, value),
        }
    }
}

fn entry_field(entry: &mut FeedEntry, name: &str, parent: Option<&str>, value: String) {
    let direct = matches!(parent, Some("item" | "entry"));
    match name {
        "title" if direct => {
            entry.title.get_or_insert(value);
        }
        "link" if direct => {
            entry.link.get_or_insert(value);
        }
        "pubDate" | "published" | "dc:date" if direct => entry.published = Some(value),
        "updated" if direct => {
            entry.published.get_or_insert(value);
        }
        "description" | "summary" | "content" | "content:encoded" if direct => {
            entry.description.get_or_insert_with(|| snippet(&value));
        }
        "dc:creator" => entry.author = Some(value),
        "author" if direct => {
            entry.author.get_or_insert(value);
        }
        "name" if parent == Some("author") => {
            entry.author.get_or_insert(value);
        }
        _ => {}
    }
}

fn feed_field(feed: &mut Feed, name: &str, parent: Option<&str>, value: String) {
    let direct = matches!(parent, Some("channel" | "feed"));
    match name {
        "title" if direct => {
            feed.title.get_or_insert(value);
        }
        "link" if direct => {
            feed.link.get_or_insert(value);
        }
        "author" | "managingEditor" | "dc:creator" if direct => {
            feed.author.get_or_insert(value);
        }
        "name" if parent == Some("author") => {
            feed.author.get_or_insert(value);
        }
        _ => {}
    }
}

/// Target of an Atom `<link>` pointing at the page itself.
fn link_href(e: &BytesStart) -> Option<String> {
    let mut href = None;
    let mut rel = None;
    for attr in e.attributes().flatten() {
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        match attr.key.as_ref() {
            b"href" => href = Some(value),
            b"rel" => rel = Some(value),
            _ => {}
        }
    }
    match rel.as_deref() {
        None | Some("alternate") => href,
        Some(_) => None,
    }
}

fn decode_name<R>(reader: &Reader<R>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

/// Decode an entity reference to its character, keeping unknown ones.
fn decode_entity(entity: &str) -> String {
    let decoded = match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        s if s.starts_with("#x") || s.starts_with("#X") => {
            u32::from_str_radix(&s[2..], 16).ok().and_then(char::from_u32)
        }
        s if s.starts_with('#') => s[1..].parse().ok().and_then(char::from_u32),
        _ => None,
    };
    decoded.map_or_else(|| format!("&{entity};"), String::from)
}

/// Plain text of an HTML fragment with whitespace collapsed.
///
/// Text of separate elements is joined with a space. Script and style
/// content is dropped.
fn snippet(html: &str) -> String {
    let document = kuchikiki::parse_html().one(html);
    let mut words = Vec::new();
    for text in document.descendants().text_nodes() {
        let hidden = text
            .as_node()
            .parent()
            .and_then(|parent| {
                parent
                    .as_element()
                    .map(|element| matches!(&*element.name.local, "script" | "style"))
            })
            .unwrap_or(false);
        if !hidden {
            words.extend(text.borrow().split_whitespace().map(str::to_owned));
        }
    }
    words.join(" ")
}
