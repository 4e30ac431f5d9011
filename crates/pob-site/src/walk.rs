//! Source and output tree traversal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Recursively collect files with `extension` under `dir`.
pub(crate) fn collect_files(
    dir: &Path,
    extension: &str,
    files: &mut Vec<PathBuf>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, extension, files)?;
        } else if path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    Ok(())
}
