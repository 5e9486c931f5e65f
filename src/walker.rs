use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{BuildError, Result};

/// Lists every regular file below `root`, recursively.
///
/// Directories are descended into but not returned, and entries come back in
/// file-name order so builds are reproducible. Any directory that cannot be
/// read fails the whole listing. Paths are `root` joined with the entry, so
/// they are only absolute when `root` is; nothing is canonicalized.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| BuildError::Discover {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// [`list_files`] on the blocking pool, for use from the async build.
pub async fn list_files_async(root: &Path) -> Result<Vec<PathBuf>> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || list_files(&root)).await?
}
