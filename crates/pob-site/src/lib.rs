//! Site-level build steps.
//!
//! - [`DraftPolicy`]: decides whether `draft: true` pages are published
//! - [`PostProcessor`]: applies the table-of-contents transform to every
//!   rendered `.html` file of an output directory
//! - [`readable_date`], [`machine_date`], [`except`]: layout filters

mod drafts;
mod error;
mod filters;
mod post_process;
mod walk;

pub use drafts::{
    BUILD_DRAFTS_ENV, DraftPage, DraftPolicy, PageData, Permalink, RunMode, find_drafts,
    split_front_matter,
};
pub use error::SiteError;
pub use filters::{except, machine_date, readable_date};
pub use post_process::{PostProcessReport, PostProcessor};
