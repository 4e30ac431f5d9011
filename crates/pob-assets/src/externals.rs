//! Versioned output paths and an import map for external packages.
//!
//! Each package is copied to `assets/external/<name>-<version>` so a new
//! release changes every URL that points at it. Scoped packages keep their
//! scope directory: `@scope/name` becomes `assets/external/@scope/name-<version>`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::AssetError;

/// Output directory for copied packages.
const EXTERNAL_DIR: &str = "assets/external";

/// Entry point used when a manifest names none.
const DEFAULT_ENTRY: &str = "index.js";

/// Browser import map (`<script type="importmap">`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportMap {
    /// Specifier to URL.
    pub imports: BTreeMap<String, String>,
}

/// A directory copy from `node_modules` into the site output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Passthrough {
    /// Package directory under `node_modules`.
    pub source: PathBuf,
    /// Output path relative to the site root.
    pub destination: String,
}

/// Resolved external packages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Externals {
    /// Import map covering every resolved package.
    pub import_map: ImportMap,
    /// Identifier derived from all package versions, in package order.
    pub cache_version: String,
    /// Package name to version.
    pub versions: BTreeMap<String, String>,
    /// Directory copies the build must perform.
    #[serde(skip)]
    pub passthrough: Vec<Passthrough>,
}

impl Externals {
    /// Resolve `packages` installed under `node_modules`.
    ///
    /// Packages whose `package.json` cannot be read or lacks a version are
    /// logged and skipped.
    pub fn resolve(node_modules: &Path, packages: &[String]) -> Self {
        let mut externals = Self::default();
        if packages.is_empty() {
            tracing::warn!("No external packages specified");
            return externals;
        }

        let mut cache_parts = Vec::with_capacity(packages.len());

        for package in packages {
            let manifest = match load_manifest(node_modules, package) {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::error!(package = %package, error = %e, "Skipping external package");
                    continue;
                }
            };
            let Some(version) = manifest.get("version").and_then(Value::as_str) else {
                let e = AssetError::MissingVersion(package.clone());
                tracing::error!(package = %package, error = %e, "Skipping external package");
                continue;
            };

            let output_path = versioned_path(package, version);
            let entry = manifest_entry_point(&manifest);
            let base = format!("/{output_path}");

            externals
                .import_map
                .imports
                .insert(package.clone(), format!("{base}/{entry}"));
            externals
                .import_map
                .imports
                .insert(format!("{package}/"), format!("{base}/"));
            externals.passthrough.push(Passthrough {
                source: node_modules.join(package),
                destination: output_path,
            });
            externals
                .versions
                .insert(package.clone(), version.to_owned());

            let name: String = package.chars().filter(|c| !matches!(c, '/' | '@')).collect();
            cache_parts.push(format!("{name}-{version}"));
        }

        externals.cache_version = cache_parts.join("_");
        tracing::debug!(
            packages = externals.versions.len(),
            cache_version = %externals.cache_version,
            "Resolved external packages"
        );
        externals
    }
}

fn load_manifest(node_modules: &Path, package: &str) -> Result<Value, AssetError> {
    let path = node_modules.join(package).join("package.json");
    let content = fs::read_to_string(&path).map_err(|source| AssetError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AssetError::Manifest {
        package: package.to_owned(),
        source,
    })
}

/// Output path for `package` at `version`.
fn versioned_path(package: &str, version: &str) -> String {
    match package.split_once('/') {
        Some((scope, name)) if package.starts_with('@') => {
            format!("{EXTERNAL_DIR}/{scope}/{name}-{version}")
        }
        _ => format!("{EXTERNAL_DIR}/{package}-{version}"),
    }
}

/// Entry point of a package manifest, relative to the package directory.
///
/// `exports["."]` wins when present, then `module`, then `main`.
fn manifest_entry_point(manifest: &Value) -> String {
    if let Some(dot) = manifest.get("exports").and_then(|e| e.get(".")) {
        return resolve_entry_point(dot).map_or_else(
            || DEFAULT_ENTRY.to_owned(),
            |entry| entry.strip_prefix("./").unwrap_or(entry).to_owned(),
        );
    }

    ["module", "main"]
        .iter()
        .find_map(|key| manifest.get(*key).and_then(Value::as_str))
        .unwrap_or(DEFAULT_ENTRY)
        .to_owned()
}

/// Resolve a conditional `exports` entry to a path.
///
/// Priority: a plain string, then `browser` (string or `browser.default`),
/// then `import`, then `default`.
///
/// # Examples
///
/// ```
/// use pob_assets::resolve_entry_point;
/// use serde_json::json;
///
/// let exports = json!({ "browser": { "default": "./web.js" }, "default": "./node.js" });
/// assert_eq!(resolve_entry_point(&exports), Some("./web.js"));
/// ```
pub fn resolve_entry_point(exports: &Value) -> Option<&str> {
    if let Some(path) = exports.as_str() {
        return Some(path);
    }

    let conditions = exports.as_object()?;
    if let Some(browser) = conditions.get("browser") {
        if let Some(path) = browser.as_str() {
            return Some(path);
        }
        if let Some(path) = browser.get("default").and_then(Value::as_str) {
            return Some(path);
        }
    }

    ["import", "default"]
        .iter()
        .find_map(|key| conditions.get(*key).and_then(Value::as_str))
}
