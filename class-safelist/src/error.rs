//! Error types for `class-safelist`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use class_config::StyleError;
use thiserror::Error;

/// Errors surfaced by the `class-safelist` pipeline.
#[derive(Debug, Error)]
pub enum SafelistCliError {
    /// Configuration could not be loaded or merged.
    #[error(transparent)]
    Style(#[from] Arc<StyleError>),

    /// Manifest could not be encoded.
    #[error("failed to encode safelist manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
