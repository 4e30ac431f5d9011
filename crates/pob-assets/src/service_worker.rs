//! Service worker cache naming.

/// Token in the service worker template replaced by the cache name.
pub const CACHE_NAME_PLACEHOLDER: &str = "%%CACHE_NAME%%";

/// Length of the commit prefix in the cache name.
const SHA_PREFIX_LEN: usize = 8;

/// Cache name for a build of `commit_sha`.
///
/// # Examples
///
/// ```
/// use pob_assets::service_worker_cache_name;
///
/// assert_eq!(service_worker_cache_name("0123456789abcdef"), "pob-dev-01234567");
/// assert_eq!(service_worker_cache_name("dev"), "pob-dev-dev");
/// ```
pub fn service_worker_cache_name(commit_sha: &str) -> String {
    let prefix: String = commit_sha.chars().take(SHA_PREFIX_LEN).collect();
    format!("pob-dev-{prefix}")
}

/// Substitute the cache name into a service worker template.
pub fn render_service_worker(template: &str, commit_sha: &str) -> String {
    if !template.contains(CACHE_NAME_PLACEHOLDER) {
        tracing::warn!("Service worker template has no cache name placeholder");
    }
    template.replace(CACHE_NAME_PLACEHOLDER, &service_worker_cache_name(commit_sha))
}
