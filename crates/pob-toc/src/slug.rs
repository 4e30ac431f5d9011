//! Heading identifier derivation.
//!
//! A heading's identifier is the slug of its text with a fixed set of
//! punctuation removed, made unique within the document by probing
//! `base`, `base-1`, `base-2`, … against an [`IdRegistry`].

use std::collections::HashSet;

/// Characters removed from a slug after slugification.
const STRIPPED_CHARS: &[char] = &[
    '&', ',', '+', '(', ')', '$', '~', '%', '.', '\'', '"', ':', '*', '?', '!', '<', '>', '{', '}',
];

/// Punctuation kept by [`PreserveCaseSlugify`].
const KEPT_PUNCTUATION: &[char] = &[
    '$', '*', '_', '+', '~', '.', '(', ')', '\'', '"', '!', '-', ':', '@',
];

/// Maps arbitrary heading text to a URL-safe token.
///
/// Implemented for any `Fn(&str) -> String`, so a host can pass its own
/// slug function directly.
pub trait Slugify {
    /// Convert `text` to a slug.
    fn slugify(&self, text: &str) -> String;
}

impl<F> Slugify for F
where
    F: Fn(&str) -> String,
{
    fn slugify(&self, text: &str) -> String {
        self(text)
    }
}

/// Case-preserving slugifier.
///
/// Trims the text, collapses whitespace runs into a single `-`, and drops
/// characters that are neither alphanumeric nor URL-tolerant punctuation.
///
/// # Examples
///
/// ```
/// use pob_toc::{PreserveCaseSlugify, Slugify};
///
/// assert_eq!(PreserveCaseSlugify.slugify("Section 1"), "Section-1");
/// assert_eq!(PreserveCaseSlugify.slugify("  What's new?  "), "What's-new");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PreserveCaseSlugify;

impl Slugify for PreserveCaseSlugify {
    fn slugify(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut pending_dash = false;

        for c in text.trim().chars() {
            if c.is_whitespace() {
                pending_dash = !result.is_empty();
            } else if c.is_alphanumeric() || KEPT_PUNCTUATION.contains(&c) {
                if pending_dash {
                    result.push('-');
                    pending_dash = false;
                }
                result.push(c);
            }
        }

        result
    }
}

/// Lowercase ASCII slugifier backed by the `slug` crate.
///
/// Transliterates Unicode to ASCII, lowercases, and joins words with `-`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseSlugify;

impl Slugify for LowercaseSlugify {
    fn slugify(&self, text: &str) -> String {
        slug::slugify(text)
    }
}

/// Set of identifiers already assigned within one document.
#[derive(Debug, Default)]
pub struct IdRegistry {
    ids: HashSet<String>,
}

impl IdRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `id` has already been assigned.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of assigned identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check whether nothing has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Reserve the first free identifier among `base`, `base-1`, `base-2`, …
    ///
    /// The suffix search always restarts at `base`, so identifiers for a document
    /// depend only on heading order, never on registry internals.
    pub fn reserve(&mut self, base: &str) -> String {
        let mut candidate = base.to_owned();
        let mut suffix = 0usize;
        while self.ids.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}-{suffix}");
        }
        self.ids.insert(candidate.clone());
        candidate
    }
}

/// Remove the punctuation that is unsafe in fragment identifiers.
fn strip_punctuation(slug: &str) -> String {
    slug.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}

/// Derives unique identifiers for the headings of one document.
///
/// Holds the document's [`IdRegistry`]; create one per document.
pub struct SlugAssigner<'a> {
    slugify: &'a dyn Slugify,
    registry: IdRegistry,
}

impl<'a> SlugAssigner<'a> {
    /// Create an assigner with an empty registry.
    pub fn new(slugify: &'a dyn Slugify) -> Self {
        Self {
            slugify,
            registry: IdRegistry::new(),
        }
    }

    /// Derive, reserve and return the identifier for a heading's text.
    pub fn assign(&mut self, text: &str) -> String {
        let base = strip_punctuation(&self.slugify.slugify(text));
        self.registry.reserve(&base)
    }

    /// Identifiers assigned so far.
    pub fn registry(&self) -> &IdRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_case_slugify() {
        let slugify = PreserveCaseSlugify;
        assert_eq!(slugify.slugify("Section 1"), "Section-1");
        assert_eq!(slugify.slugify("Subsection 1.1"), "Subsection-1.1");
        assert_eq!(slugify.slugify("  Spaces  "), "Spaces");
        assert_eq!(slugify.slugify("Multiple   Spaces"), "Multiple-Spaces");
        assert_eq!(slugify.slugify("a/b#c"), "abc");
        assert_eq!(slugify.slugify("Café au lait"), "Café-au-lait");
    }

    #[test]
    fn test_lowercase_slugify() {
        assert_eq!(LowercaseSlugify.slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_closure_slugify() {
        let upper = |text: &str| text.to_uppercase();
        assert_eq!(upper.slugify("abc"), "ABC");
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("Subsection-1.1"), "Subsection-11");
        assert_eq!(strip_punctuation("What's-New?"), "Whats-New");
        assert_eq!(strip_punctuation("a&b,c+d(e)$~%'\":*!<>{}"), "abcde");
        assert_eq!(strip_punctuation("keep-_@"), "keep-_@");
    }

    #[test]
    fn test_registry_suffixes() {
        let mut registry = IdRegistry::new();
        assert_eq!(registry.reserve("faq"), "faq");
        assert_eq!(registry.reserve("faq"), "faq-1");
        assert_eq!(registry.reserve("faq"), "faq-2");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_registry_skips_taken_suffix() {
        let mut registry = IdRegistry::new();
        assert_eq!(registry.reserve("a-1"), "a-1");
        assert_eq!(registry.reserve("a"), "a");
        assert_eq!(registry.reserve("a"), "a-2");
        assert!(registry.contains("a-2"));
    }

    #[test]
    fn test_assigner_strips_and_dedupes() {
        let slugify = PreserveCaseSlugify;
        let mut assigner = SlugAssigner::new(&slugify);
        assert_eq!(assigner.assign("Hello, World!"), "Hello-World");
        assert_eq!(assigner.assign("Hello World"), "Hello-World-1");
        assert_eq!(assigner.registry().len(), 2);
    }
}
