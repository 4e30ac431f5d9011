//! Draft gating.
//!
//! Pages with `draft: true` in their front matter are only published when
//! drafts are built: in serve and watch runs, or when `BUILD_DRAFTS` is set.
//! Unbuilt drafts get `permalink: false` (nothing is written) and are
//! excluded from collections.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SiteError;
use crate::walk::collect_files;

/// Environment variable that forces drafts to be built.
pub const BUILD_DRAFTS_ENV: &str = "BUILD_DRAFTS";

/// How the site build was started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// One-off production build.
    #[default]
    Build,
    /// Development server.
    Serve,
    /// Rebuild on change.
    Watch,
}

impl RunMode {
    /// Check whether this mode builds drafts on its own.
    pub fn builds_drafts(self) -> bool {
        matches!(self, Self::Serve | Self::Watch)
    }
}

/// Page permalink from front matter: a path, or `false` to skip output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permalink {
    /// `permalink: false` (or `true`, which keeps the default).
    Flag(bool),
    /// Explicit output path.
    Path(String),
}

impl Permalink {
    /// Permalink that suppresses output.
    pub const DISABLED: Self = Self::Flag(false);

    /// Check whether the page produces no output.
    pub fn is_disabled(&self) -> bool {
        *self == Self::DISABLED
    }
}

/// Front matter fields relevant to draft gating.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Marks the page as unpublished.
    #[serde(default)]
    pub draft: bool,
    /// Output path override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<Permalink>,
    /// Keep the page out of collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eleventy_exclude_from_collections: Option<bool>,
}

impl PageData {
    /// Parse front matter YAML. Empty content gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, SiteError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed).map_err(|e| SiteError::FrontMatter(format!("Invalid YAML: {e}")))
    }

    /// Parse the front matter of a page source, if it has any.
    pub fn from_source(source: &str) -> Result<Self, SiteError> {
        match split_front_matter(source) {
            Some((yaml, _)) => Self::from_yaml(yaml),
            None => Ok(Self::default()),
        }
    }
}

/// Split `---` delimited front matter from the page body.
///
/// # Examples
///
/// ```
/// use pob_site::split_front_matter;
///
/// let (yaml, body) = split_front_matter("---\ndraft: true\n---\n# Hello\n").unwrap();
/// assert_eq!(yaml, "draft: true\n");
/// assert_eq!(body, "# Hello\n");
/// assert!(split_front_matter("# No front matter").is_none());
/// ```
pub fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Decides how draft pages are published.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DraftPolicy {
    build_drafts: bool,
}

impl DraftPolicy {
    /// Policy for a run in `mode`, honouring `BUILD_DRAFTS`.
    pub fn new(mode: RunMode) -> Self {
        let env = std::env::var(BUILD_DRAFTS_ENV).ok();
        Self::resolve(mode, env.as_deref())
    }

    fn resolve(mode: RunMode, env: Option<&str>) -> Self {
        let build_drafts = mode.builds_drafts() || env.is_some_and(|value| !value.is_empty());
        Self { build_drafts }
    }

    /// Force drafts on, as `drafts.build_drafts` in the configuration does.
    #[must_use]
    pub fn with_build_drafts(mut self, build_drafts: bool) -> Self {
        self.build_drafts |= build_drafts;
        self
    }

    /// Check whether drafts are published.
    pub fn builds_drafts(&self) -> bool {
        self.build_drafts
    }

    /// Check whether `page` is held back.
    pub fn is_hidden(&self, page: &PageData) -> bool {
        page.draft && !self.build_drafts
    }

    /// Effective permalink of `page`.
    pub fn permalink(&self, page: &PageData) -> Option<Permalink> {
        if self.is_hidden(page) {
            return Some(Permalink::DISABLED);
        }
        page.permalink.clone()
    }

    /// Effective `eleventyExcludeFromCollections` of `page`.
    pub fn exclude_from_collections(&self, page: &PageData) -> Option<bool> {
        if self.is_hidden(page) {
            return Some(true);
        }
        page.eleventy_exclude_from_collections
    }
}

/// A source page marked as a draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftPage {
    /// Source file.
    pub path: PathBuf,
    /// Title from front matter.
    pub title: Option<String>,
    /// Whether the policy holds the page back.
    pub hidden: bool,
}

/// Find the draft pages among the Markdown sources under `input_dir`.
///
/// Pages with unreadable files or invalid front matter are logged and skipped.
pub fn find_drafts(input_dir: &Path, policy: &DraftPolicy) -> Result<Vec<DraftPage>, SiteError> {
    let mut files = Vec::new();
    collect_files(input_dir, "md", &mut files).map_err(|source| SiteError::Io {
        path: input_dir.to_path_buf(),
        source,
    })?;
    files.sort();

    let mut drafts = Vec::new();
    for path in files {
        let page = match fs::read_to_string(&path)
            .map_err(|source| SiteError::Io {
                path: path.clone(),
                source,
            })
            .and_then(|source| PageData::from_source(&source))
        {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping page");
                continue;
            }
        };
        if page.draft {
            drafts.push(DraftPage {
                hidden: policy.is_hidden(&page),
                title: page.title,
                path,
            });
        }
    }

    tracing::debug!(drafts = drafts.len(), "Scanned pages for drafts");
    Ok(drafts)
}
