//! Content hashing for cache busting and subresource integrity.

use std::fs;
use std::path::Path;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use sha2::{Digest, Sha512};

/// Check whether `file` is a remote URL (`http://` or `https://`).
pub fn is_remote(file: &str) -> bool {
    let lower = file.get(..8).unwrap_or(file).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// 53-bit string hash over UTF-16 code units.
///
/// Two interleaved 32-bit multiply-xor lanes, mixed at the end; the result
/// fits an IEEE double exactly, so the same text hashes identically in a
/// browser.
pub fn content_hash(text: &str, seed: u32) -> u64 {
    let mut h1: u32 = 0xdead_beef ^ seed;
    let mut h2: u32 = 0x41c6_ce57 ^ seed;

    for unit in text.encode_utf16() {
        let ch = u32::from(unit);
        h1 = (h1 ^ ch).wrapping_mul(2_654_435_761);
        h2 = (h2 ^ ch).wrapping_mul(1_597_334_677);
    }

    h1 = (h1 ^ (h1 >> 16)).wrapping_mul(2_246_822_507)
        ^ (h2 ^ (h2 >> 13)).wrapping_mul(3_266_489_909);
    h2 = (h2 ^ (h2 >> 16)).wrapping_mul(2_246_822_507)
        ^ (h1 ^ (h1 >> 13)).wrapping_mul(3_266_489_909);

    (u64::from(h2 & 0x1f_ffff) << 32) | u64::from(h1)
}

/// Append a content hash query string to a local file reference.
///
/// `file` is resolved against `root`. Empty input yields an empty string;
/// remote URLs and unreadable files are returned unchanged.
pub fn hash_content(root: &Path, file: &str) -> String {
    if file.is_empty() {
        return String::new();
    }
    if is_remote(file) {
        return file.to_owned();
    }

    let path = root.join(file.trim_start_matches('/'));
    match fs::read_to_string(&path) {
        Ok(content) => format!("{file}?h={}", content_hash(&content, 0)),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to load file for hashing");
            file.to_owned()
        }
    }
}

/// Build an `integrity="sha512-…"` attribute for a local file.
///
/// Returns an empty string for empty input, remote URLs, and unreadable
/// files.
pub fn ssri(root: &Path, file: &str) -> String {
    if file.is_empty() || is_remote(file) {
        return String::new();
    }

    let path = root.join(file.trim_start_matches('/'));
    match fs::read(&path) {
        Ok(content) => {
            let digest = Sha512::digest(&content);
            format!(r#"integrity="sha512-{}""#, BASE64_STANDARD.encode(digest))
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to load file for ssri");
            String::new()
        }
    }
}
