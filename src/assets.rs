//! Shared assets written next to the pages.
//!
//! `prism.css` and `prism.js` are copied out of the resources embedded in the
//! binary; `style.css` is generated from the theme palette.

use rust_embed::RustEmbed;
use std::io;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tokio::fs;

use crate::error::{BuildError, Result};
use crate::template::embedded_template;
use crate::theme::Theme;

#[derive(RustEmbed)]
#[folder = "assets/prism/"]
struct HighlightAssets;

pub const ASSETS_DIR: &str = "assets";
const RUNTIME_SCRIPT: &str = "prism.js";
const STYLE_TEMPLATE: &str = "style.css";

/// Writes `assets/prism.css`, `assets/prism.js` and `assets/style.css`
/// under `output_dir` for `theme`. Existing files are overwritten.
pub async fn publish(output_dir: &Path, theme: Theme) -> Result<PathBuf> {
    let assets_dir = output_dir.join(ASSETS_DIR);
    fs::create_dir_all(&assets_dir)
        .await
        .map_err(|source| BuildError::CreateDir {
            path: assets_dir.clone(),
            source,
        })?;

    copy_resource::<HighlightAssets>(&theme.highlight_css_path(), &assets_dir.join("prism.css"))
        .await?;
    copy_resource::<HighlightAssets>(RUNTIME_SCRIPT, &assets_dir.join("prism.js")).await?;

    let style_path = assets_dir.join("style.css");
    let css = theme_stylesheet(theme)?;
    fs::write(&style_path, css)
        .await
        .map_err(|source| BuildError::Write {
            path: style_path,
            source,
        })?;

    log::debug!("Published {theme} assets to {}", assets_dir.display());
    Ok(assets_dir)
}

/// Copies one embedded resource to `dest`.
async fn copy_resource<E: RustEmbed>(name: &str, dest: &Path) -> Result<()> {
    let file = E::get(name).ok_or_else(|| BuildError::Asset {
        name: name.to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "not bundled with this build"),
    })?;
    fs::write(dest, file.data.as_ref())
        .await
        .map_err(|source| BuildError::Write {
            path: dest.to_path_buf(),
            source,
        })
}

/// Renders the site stylesheet with `theme`'s palette.
pub fn theme_stylesheet(theme: Theme) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("theme", theme.name());
    ctx.insert("palette", &theme.palette());
    ctx.insert("dark", &theme.is_dark());
    Ok(Tera::one_off(&embedded_template(STYLE_TEMPLATE)?, &ctx, false)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn publishes_all_three_files_for_every_theme() {
        for theme in Theme::ALL {
            let dir = TempDir::new().unwrap();
            let assets = publish(dir.path(), theme).await.unwrap();

            let style = std::fs::read_to_string(assets.join("style.css")).unwrap();
            assert!(style.contains(theme.palette().accent), "{theme}: accent missing");
            assert!(style.contains(&format!("site styles - {theme}")));

            let prism_css = std::fs::read(assets.join("prism.css")).unwrap();
            let expected = HighlightAssets::get(&theme.highlight_css_path()).unwrap();
            assert_eq!(prism_css, expected.data.as_ref(), "{theme}: wrong highlighter css");

            assert!(assets.join("prism.js").is_file());
        }
    }

    #[test]
    fn highlighter_css_names_its_theme() {
        let okaidia = HighlightAssets::get("themes/prism-okaidia.css").unwrap();
        let text = std::str::from_utf8(&okaidia.data).unwrap();
        assert!(text.contains("okaidia"));
    }

    #[test]
    fn stylesheet_follows_the_tone() {
        let dark = theme_stylesheet(Theme::Twilight).unwrap();
        let light = theme_stylesheet(Theme::Coy).unwrap();
        assert!(dark.contains("color-scheme: dark;"));
        assert!(dark.contains("text-shadow: 0 2px 4px var(--shadow-color);"));
        assert!(light.contains("color-scheme: light;"));
        assert!(light.contains("text-shadow: none;"));
        assert!(light.contains("--primary-color: #5e6687;"));
    }

    #[tokio::test]
    async fn publishing_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        publish(dir.path(), Theme::Okaidia).await.unwrap();
        publish(dir.path(), Theme::Default).await.unwrap();

        let style = std::fs::read_to_string(dir.path().join("assets/style.css")).unwrap();
        assert!(style.contains(Theme::Default.palette().accent));
        assert!(!style.contains(Theme::Okaidia.palette().accent));
    }

    #[tokio::test]
    async fn missing_resource_is_an_asset_error() {
        let dir = TempDir::new().unwrap();
        let err = copy_resource::<HighlightAssets>("themes/prism-nope.css", &dir.path().join("x.css"))
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Asset { ref name, .. } if name == "themes/prism-nope.css"));
    }
}
