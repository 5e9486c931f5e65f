//! Build configuration.
//!
//! Everything here can be given on the command line; the optional TOML file
//! passed with `--config` only supplies defaults for what the command line
//! leaves out.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Site-wide settings, deserializable from a TOML file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Name of one of the built-in themes. Unknown names fall back to
    /// `default` at build time.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Text shown in the footer of every page.
    #[serde(default = "default_footer")]
    pub footer: String,

    /// Value of the `lang` attribute on `<html>`.
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: default_theme(),
            footer: default_footer(),
            lang: default_lang(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| BuildError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// One build invocation.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub watch: bool,
    pub config: Config,
}

impl BuildOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        BuildOptions {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            watch: false,
            config: Config::default(),
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.config.theme = theme.into();
        self
    }
}

// --- Default value providers ---

fn default_theme() -> String { "default".to_string() }
fn default_footer() -> String { "Built with mdpress".to_string() }
fn default_lang() -> String { "en".to_string() }
