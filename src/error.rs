//! Error types for the build pipeline.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building a site.
///
/// Whether an error is fatal depends on where it is raised, not on the variant:
/// the orchestrator turns per-page errors into [`crate::models::PageFailure`]s
/// and keeps going.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to create directory `{}`", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list files under `{}`", path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("directory walk was interrupted")]
    Join(#[from] tokio::task::JoinError),

    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {format} front matter: {message}")]
    FrontMatter {
        format: &'static str,
        message: String,
    },

    #[error("template error")]
    Template(#[from] tera::Error),

    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("highlighter asset `{name}` is unavailable")]
    Asset {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file `{}`", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("file watcher failed")]
    Watch(#[from] notify::Error),
}

impl BuildError {
    /// Renders the error together with its whole `source()` chain on one line.
    pub fn detailed(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
