//! Per-page code language tracking.

use std::collections::HashMap;

/// Grammars every page with code loads.
pub const BASE_LANGUAGES: [&str; 3] = ["markup", "css", "javascript"];

/// Languages used by each page, keyed by the page's input path.
#[derive(Debug, Default)]
pub struct CodeLanguages {
    pages: HashMap<String, Vec<String>>,
}

impl CodeLanguages {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `page` uses `language`.
    pub fn record(&mut self, page: &str, language: &str) {
        let languages = self.pages.entry(page.to_owned()).or_default();
        if !languages.iter().any(|l| l == language) {
            languages.push(language.to_owned());
        }
    }

    /// Grammars to load for `page`.
    ///
    /// Empty for pages without code. Otherwise the base languages first,
    /// then the page's own languages in first-use order.
    pub fn languages_for(&self, page: &str) -> Vec<String> {
        let Some(used) = self.pages.get(page).filter(|l| !l.is_empty()) else {
            return Vec::new();
        };

        let mut all: Vec<String> = BASE_LANGUAGES.iter().map(|&l| l.to_owned()).collect();
        for language in used {
            if !all.contains(language) {
                all.push(language.clone());
            }
        }
        all
    }

    /// Forget everything recorded for `page`.
    pub fn clear_page(&mut self, page: &str) {
        self.pages.remove(page);
    }
}
