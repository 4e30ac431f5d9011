//! Post-build pass over the rendered site.
//!
//! Applies the table-of-contents transform to every `.html` file of the
//! output directory. Each document is transformed by its own invocation,
//! so files are processed in parallel.

use std::fs;
use std::path::Path;

use pob_toc::TableOfContents;
use rayon::prelude::*;

use crate::error::SiteError;
use crate::walk::collect_files;

/// Outcome of a post-processing run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PostProcessReport {
    /// HTML files found.
    pub scanned: usize,
    /// Files whose content changed and was written back.
    pub rewritten: usize,
    /// Files that could not be read, transformed or written.
    pub failed: usize,
}

/// Applies page transforms to a rendered site.
pub struct PostProcessor {
    toc: TableOfContents,
}

impl PostProcessor {
    /// Create a post-processor applying `toc`.
    pub fn new(toc: TableOfContents) -> Self {
        Self { toc }
    }

    /// Process every `.html` file under `output_dir`.
    ///
    /// Failures on single files are logged and counted, not returned.
    pub fn run(&self, output_dir: &Path) -> Result<PostProcessReport, SiteError> {
        if !output_dir.is_dir() {
            return Err(SiteError::OutputNotFound(output_dir.to_path_buf()));
        }

        let mut files = Vec::new();
        collect_files(output_dir, "html", &mut files).map_err(|source| SiteError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;
        files.sort();

        let results: Vec<Result<bool, SiteError>> =
            files.par_iter().map(|path| self.process_file(path)).collect();

        let mut report = PostProcessReport {
            scanned: files.len(),
            ..PostProcessReport::default()
        };
        for result in results {
            match result {
                Ok(true) => report.rewritten += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Failed to process page");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            rewritten = report.rewritten,
            failed = report.failed,
            "Post-processed site"
        );
        Ok(report)
    }

    /// Transform one file, writing it back only when it changed.
    pub fn process_file(&self, path: &Path) -> Result<bool, SiteError> {
        let io_error = |source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read_to_string(path).map_err(io_error)?;
        let output_path = path.to_string_lossy();
        let transformed = self
            .toc
            .apply(&content, Some(output_path.as_ref()))
            .map_err(|source| SiteError::Toc {
                path: path.to_path_buf(),
                source,
            })?;

        if transformed == content {
            tracing::debug!(path = %path.display(), "Page unchanged");
            return Ok(false);
        }
        fs::write(path, transformed).map_err(io_error)?;
        tracing::debug!(path = %path.display(), "Page rewritten");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pob_toc::TocOptions;
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE: &str = "<html><head></head><body><h2>A</h2></body></html>";

    fn processor(parent: &str) -> PostProcessor {
        PostProcessor::new(TableOfContents::new(TocOptions {
            parent: parent.to_owned(),
            ..TocOptions::default()
        }))
    }

    #[test]
    fn test_run_rewrites_html_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts/hello")).unwrap();
        fs::write(dir.path().join("index.html"), PAGE).unwrap();
        fs::write(dir.path().join("posts/hello/index.html"), PAGE).unwrap();
        fs::write(dir.path().join("style.css"), "h2 { color: red }").unwrap();

        let report = processor("body").run(dir.path()).unwrap();

        assert_eq!(
            report,
            PostProcessReport {
                scanned: 2,
                rewritten: 2,
                failed: 0,
            }
        );
        let html = fs::read_to_string(dir.path().join("posts/hello/index.html")).unwrap();
        assert!(html.contains(r##"<h2 id="A">A</h2><ol><li><a href="#A" id="A">A</a></li></ol>"##));
        assert_eq!(html.matches("<ol>").count(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("style.css")).unwrap(),
            "h2 { color: red }"
        );
    }

    #[test]
    fn test_each_page_transformed_once() {
        let dir = tempfile::tempdir().unwrap();
        let pages = ["index.html", "about/index.html", "posts/a/index.html", "posts/b/index.html"];
        for page in pages {
            let path = dir.path().join(page);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "<body><h2>One</h2><h3>Two</h3><h2>Three</h2></body>").unwrap();
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let toc = TableOfContents::new(TocOptions::default()).with_slugify(move |text: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            text.replace(' ', "-")
        });

        let report = PostProcessor::new(toc).run(dir.path()).unwrap();

        assert_eq!(report.rewritten, pages.len());
        assert_eq!(calls.load(Ordering::SeqCst), 3 * pages.len());
        for page in pages {
            let html = fs::read_to_string(dir.path().join(page)).unwrap();
            assert_eq!(html.matches("<ol>").count(), 2, "{page}");
            assert_eq!(html.matches(r##"<a href="#One""##).count(), 1, "{page}");
        }
    }

    #[test]
    fn test_missing_mount_point_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<p>no toc here</p>").unwrap();

        let report = processor("#toc").run(dir.path()).unwrap();

        assert_eq!(report.scanned, 1);
        assert_eq!(report.rewritten, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>no toc here</p>");
    }

    #[test]
    fn test_failures_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), PAGE).unwrap();

        let report = processor("[[").run(dir.path()).unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.rewritten, 0);
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = processor("body").run(&dir.path().join("public")).unwrap_err();
        assert!(matches!(err, SiteError::OutputNotFound(_)));
    }
}
