use std::path::{Component, Path, PathBuf};

use crate::frontmatter::Metadata;

/// A Markdown source file after its front matter has been split off.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub metadata: Metadata,
    pub body: String,
}

/// A rendered page, ready to be written once.
#[derive(Debug, Clone)]
pub struct Page {
    pub html: String,
    pub output_path: PathBuf,
    pub assets_prefix: String,
}

/// A page that could not be built, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub path: PathBuf,
    pub message: String,
}

/// What a build did.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<PageFailure>,
    pub warnings: Vec<String>,
}

impl BuildReport {
    pub fn pages_written(&self) -> usize {
        self.written.len()
    }
}

/// Maps `input_root/dir/name.md` to `dir/name.html`, relative to the output root.
pub fn relative_output_path(input_root: &Path, source: &Path) -> PathBuf {
    let relative = source.strip_prefix(input_root).unwrap_or(source);
    relative.with_extension("html")
}

/// Relative path from a page to the shared `assets` directory.
///
/// `relative_output` is the page path relative to the output root; each
/// directory above the file adds one `../`.
pub fn assets_prefix(relative_output: &Path) -> String {
    let depth = relative_output
        .parent()
        .map(|dir| {
            dir.components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .count()
        })
        .unwrap_or(0);

    if depth == 0 {
        "./assets".to_string()
    } else {
        format!("{}assets", "../".repeat(depth))
    }
}
