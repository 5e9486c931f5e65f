//! The build pipeline.
//!
//! One build walks the input tree once, turns every `.md` file into a page
//! and then publishes the shared assets. Pages are independent of each other:
//! a page that fails is logged and recorded in the [`BuildReport`], and the
//! rest of the build carries on.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;

use crate::assets;
use crate::config::BuildOptions;
use crate::error::{BuildError, Result};
use crate::frontmatter::parse_frontmatter;
use crate::highlight::Highlighter;
use crate::models::{assets_prefix, relative_output_path, BuildReport, Document, Page, PageFailure};
use crate::parser::render_markdown;
use crate::template::PageRenderer;
use crate::theme::Theme;
use crate::walker;

/// True for files with exactly the `.md` extension.
pub fn is_markdown(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("md"))
}

async fn find_markdown_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let files = walker::list_files_async(input_dir).await?;
    Ok(files.into_iter().filter(|p| is_markdown(p)).collect())
}

async fn read_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let (metadata, body) = parse_frontmatter(&raw)?;
    if metadata.is_empty() {
        log::debug!("{} has no front matter", path.display());
    }
    Ok(Document {
        path: path.to_path_buf(),
        metadata,
        body: body.to_string(),
    })
}

fn render_page(
    doc: &Document,
    opts: &BuildOptions,
    highlighter: &Highlighter,
    renderer: &PageRenderer,
) -> Result<Page> {
    let body = render_markdown(&doc.body, highlighter);
    let relative = relative_output_path(&opts.input_dir, &doc.path);
    let prefix = assets_prefix(&relative);
    let html = renderer.render(&body, &doc.metadata, &prefix)?;

    Ok(Page {
        html,
        output_path: opts.output_dir.join(relative),
        assets_prefix: prefix,
    })
}

async fn write_page(page: &Page) -> Result<()> {
    if let Some(parent) = page.output_path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| BuildError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    fs::write(&page.output_path, &page.html)
        .await
        .map_err(|source| BuildError::Write {
            path: page.output_path.clone(),
            source,
        })
}

async fn build_page(
    source: &Path,
    opts: &BuildOptions,
    highlighter: &Highlighter,
    renderer: &PageRenderer,
) -> Result<PathBuf> {
    let doc = read_document(source).await?;
    let page = render_page(&doc, opts, highlighter, renderer)?;
    log::debug!(
        "{} -> {} (assets at {})",
        source.display(),
        page.output_path.display(),
        page.assets_prefix
    );
    write_page(&page).await?;
    Ok(page.output_path)
}

/// Builds the site described by `opts` once.
///
/// Fatal errors (output directory, discovery, templates, assets) are
/// returned; per-page errors only show up in the report.
pub async fn perform_build(opts: &BuildOptions) -> Result<BuildReport> {
    let start = Instant::now();
    let mut report = BuildReport::default();

    log::info!("Reading input directory {}", opts.input_dir.display());
    fs::create_dir_all(&opts.output_dir)
        .await
        .map_err(|source| BuildError::CreateDir {
            path: opts.output_dir.clone(),
            source,
        })?;

    let sources = find_markdown_files(&opts.input_dir).await?;
    if sources.is_empty() {
        log::warn!("No Markdown files found in {}", opts.input_dir.display());
        return Ok(report);
    }
    log::info!("Found {} Markdown files", sources.len());

    let selection = Theme::select(&opts.config.theme);
    report.warnings.extend(selection.warning);
    let highlighter = Highlighter::new(selection.theme);
    let renderer = PageRenderer::new(&opts.config)?;

    for source in &sources {
        match build_page(source, opts, &highlighter, &renderer).await {
            Ok(output) => {
                let shown = output.strip_prefix(&opts.output_dir).unwrap_or(&output);
                log::info!("Generated: {}", shown.display());
                report.written.push(output);
            }
            Err(e) => {
                let message = e.detailed();
                log::error!("Failed to process {}: {message}", source.display());
                report.failures.push(PageFailure {
                    path: source.clone(),
                    message,
                });
            }
        }
    }

    assets::publish(&opts.output_dir, highlighter.theme()).await?;

    log::info!(
        "Successfully built {} pages in {:.2}s",
        report.pages_written(),
        start.elapsed().as_secs_f32()
    );
    Ok(report)
}
