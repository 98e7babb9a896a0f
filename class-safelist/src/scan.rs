//! Colour discovery across a project tree.

use camino::Utf8Path;
use class_config::Config;
use class_config::safelist::{ColorScanner, DirSourceReader, DiscoveredColors, discover_in_files};

use crate::error::SafelistCliError;

/// Scans `root` for every component named in `app`.
///
/// Only files whose extension is listed in `extensions` are read. Unreadable
/// files are logged and skipped.
///
/// # Errors
///
/// Returns [`SafelistCliError::Io`] when the tree cannot be walked and
/// [`SafelistCliError::Style`] when a discovery pattern fails to compile.
pub fn discover_colors(
    app: &Config,
    root: &Utf8Path,
    prefix: &str,
    extensions: &[String],
) -> Result<DiscoveredColors, SafelistCliError> {
    let reader = DirSourceReader::open(root).map_err(|source| SafelistCliError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    let files = reader
        .source_files(extensions)
        .map_err(|source| SafelistCliError::Io {
            path: root.to_path_buf(),
            source,
        })?;
    let scanners = app
        .keys()
        .map(|component| ColorScanner::new(prefix, component))
        .collect::<Result<Vec<_>, _>>()?;

    let mut colors = DiscoveredColors::new();
    let scanned = discover_in_files(&reader, &files, &scanners, &mut colors);
    tracing::info!(
        root = %root,
        files = files.len(),
        scanned,
        components = scanners.len(),
        "scanned project sources"
    );
    Ok(colors)
}
