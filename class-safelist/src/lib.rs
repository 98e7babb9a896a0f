//! Library interface for the `class-safelist` manifest generator.
//!
//! The binary loads component defaults and global overrides, scans a project
//! tree for the colours each component is rendered with, and writes the
//! resulting safelist manifest as JSON.

pub mod cli;
pub mod error;
pub mod output;
pub mod scan;

use class_config::safelist::SafelistBuilder;
use class_config::{SafelistPattern, StyleContext};

use crate::cli::Args;
use crate::error::SafelistCliError;

/// Loads configuration, scans sources and builds the manifest for `args`.
///
/// # Errors
///
/// Returns [`SafelistCliError`] when configuration cannot be loaded or
/// merged, or the project tree cannot be walked.
pub fn build_manifest(args: &Args) -> Result<Vec<SafelistPattern>, SafelistCliError> {
    let context = StyleContext::load(&args.config, args.global.as_deref())?;
    let app = context.app_config()?;
    let colors = scan::discover_colors(&app, &args.root, &args.prefix, &args.extensions)?;
    let manifest = SafelistBuilder::default()
        .with_neutral_color(args.neutral.as_str())
        .build(&app, &colors);
    tracing::debug!(entries = manifest.len(), "built safelist manifest");
    Ok(manifest)
}

/// Builds the manifest for `args` and writes it to its destination.
///
/// # Errors
///
/// Propagates failures from [`build_manifest`] and
/// [`output::write_manifest`].
pub fn run(args: &Args) -> Result<(), SafelistCliError> {
    let manifest = build_manifest(args)?;
    output::write_manifest(args.out.as_deref(), &manifest)
}
