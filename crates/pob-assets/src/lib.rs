//! Asset helpers used while rendering page layouts.
//!
//! - [`hash_content`] / [`ssri`]: cache-busting query strings and
//!   subresource integrity attributes for local files
//! - [`Externals`]: versioned output paths and an import map for
//!   third-party packages copied out of `node_modules`
//! - [`render_service_worker`]: per-commit service worker cache names
//! - [`json_html`]: values embedded in HTML attributes

mod error;
mod externals;
mod hash;
mod json_html;
mod service_worker;

pub use error::AssetError;
pub use externals::{Externals, ImportMap, Passthrough, resolve_entry_point};
pub use hash::{content_hash, hash_content, is_remote, ssri};
pub use json_html::json_html;
pub use service_worker::{CACHE_NAME_PLACEHOLDER, render_service_worker, service_worker_cache_name};
