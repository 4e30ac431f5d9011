//! Configuration management for the pob site tools.
//!
//! Parses `pob.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.commit_sha`
//! - `feeds.config_file`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override table-of-contents mount point.
    pub toc_parent: Option<String>,
    /// Override draft building.
    pub build_drafts: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pob.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Table-of-contents configuration.
    pub toc: TocConfig,
    /// Draft gating configuration.
    pub drafts: DraftsConfig,
    /// External dependency configuration (paths are relative strings from TOML).
    externals: ExternalsConfigRaw,
    /// Feed aggregation configuration (paths are relative strings from TOML).
    feeds: FeedsConfigRaw,
    /// Site metadata.
    pub site: SiteConfig,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Resolved externals configuration (set after loading).
    #[serde(skip)]
    pub externals_resolved: ExternalsConfig,
    /// Resolved feeds configuration (set after loading).
    #[serde(skip)]
    pub feeds_resolved: FeedsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory holding the rendered site.
    pub output_dir: PathBuf,
}

/// Which headings feed the table of contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocScope {
    /// Headings inside the mount point.
    #[default]
    Mount,
    /// Headings anywhere in the document.
    Document,
}

/// Table-of-contents configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Mount-point selector.
    pub parent: String,
    /// Heading scope.
    pub scope: TocScope,
    /// Whether anchors carry the heading id.
    pub anchor_ids: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            parent: "body".to_owned(),
            scope: TocScope::default(),
            anchor_ids: true,
        }
    }
}

/// Draft gating configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DraftsConfig {
    /// Build pages marked `draft: true`.
    pub build_drafts: bool,
}

/// Raw externals configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExternalsConfigRaw {
    node_modules: Option<String>,
    packages: Vec<String>,
}

/// Resolved externals configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ExternalsConfig {
    /// Directory containing installed packages.
    pub node_modules: PathBuf,
    /// Packages to version and expose through the import map.
    pub packages: Vec<String>,
}

/// Raw feeds configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize)]
#[serde(default)]
struct FeedsConfigRaw {
    config_file: Option<String>,
    duration_limit: Option<String>,
    timeout_secs: u64,
}

impl Default for FeedsConfigRaw {
    fn default() -> Self {
        Self {
            config_file: None,
            duration_limit: None,
            timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
        }
    }
}

/// Default timeout for fetching one feed.
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;

/// Resolved feed aggregation configuration with absolute paths.
#[derive(Debug)]
pub struct FeedsConfig {
    /// Path to the `feeds.json` source list.
    pub config_file: PathBuf,
    /// ISO-8601 duration; items older than this window are dropped.
    pub duration_limit: Option<String>,
    /// Timeout for fetching one feed, in seconds.
    pub timeout_secs: u64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from("feeds.json"),
            duration_limit: None,
            timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
        }
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Commit the site is built from, used for cache names.
    pub commit_sha: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            commit_sha: "dev".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.commit_sha`").
        field: String,
        /// Error message (e.g., "${`COMMIT_SHA`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pob.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(parent) = &settings.toc_parent {
            self.toc.parent.clone_from(parent);
        }
        if let Some(build_drafts) = settings.build_drafts {
            self.drafts.build_drafts = build_drafts;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            build: BuildConfigRaw::default(),
            toc: TocConfig::default(),
            drafts: DraftsConfig::default(),
            externals: ExternalsConfigRaw::default(),
            feeds: FeedsConfigRaw::default(),
            site: SiteConfig::default(),
            build_resolved: BuildConfig {
                output_dir: base.join("public"),
            },
            externals_resolved: ExternalsConfig {
                node_modules: base.join("node_modules"),
                packages: Vec::new(),
            },
            feeds_resolved: FeedsConfig {
                config_file: base.join("feeds.json"),
                ..FeedsConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.toc.parent, "toc.parent")?;
        require_non_empty(&self.site.commit_sha, "site.commit_sha")?;

        if self.feeds_resolved.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "feeds.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if let Some(limit) = &self.feeds_resolved.duration_limit {
            require_non_empty(limit, "feeds.duration_limit")?;
        }

        for package in &self.externals_resolved.packages {
            require_non_empty(package, "externals.packages")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.commit_sha = expand::expand_env(&self.site.commit_sha, "site.commit_sha")?;

        if let Some(ref file) = self.feeds.config_file {
            self.feeds.config_file = Some(expand::expand_env(file, "feeds.config_file")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.build_resolved = BuildConfig {
            output_dir: resolve(self.build.output_dir.as_deref(), "public"),
        };

        self.externals_resolved = ExternalsConfig {
            node_modules: resolve(self.externals.node_modules.as_deref(), "node_modules"),
            packages: self.externals.packages.clone(),
        };

        self.feeds_resolved = FeedsConfig {
            config_file: resolve(self.feeds.config_file.as_deref(), "feeds.json"),
            duration_limit: self.feeds.duration_limit.clone(),
            timeout_secs: self.feeds.timeout_secs,
        };
    }
}
