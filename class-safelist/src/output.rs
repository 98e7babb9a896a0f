//! Manifest writers for `class-safelist`.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use class_config::SafelistPattern;

use crate::error::SafelistCliError;

/// Encodes `manifest` as pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Returns [`SafelistCliError::Json`] when encoding fails.
pub fn render_manifest(manifest: &[SafelistPattern]) -> Result<String, SafelistCliError> {
    let mut content = serde_json::to_string_pretty(manifest)?;
    content.push('\n');
    Ok(content)
}

/// Writes `manifest` to `out`, creating parent directories as needed, or to
/// stdout when `out` is `None`.
///
/// # Errors
///
/// Returns [`SafelistCliError::Io`] when the destination cannot be written.
pub fn write_manifest(
    out: Option<&Utf8Path>,
    manifest: &[SafelistPattern],
) -> Result<(), SafelistCliError> {
    let content = render_manifest(manifest)?;
    let Some(path) = out else {
        let mut stdout = std::io::stdout().lock();
        return stdout
            .write_all(content.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|source| SafelistCliError::Io {
                path: "<stdout>".into(),
                source,
            });
    };

    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| SafelistCliError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "missing file name"),
    })?;
    let dir = ensure_dir(parent)?;
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|source| SafelistCliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    file.write_all(content.as_bytes())
        .map_err(|source| SafelistCliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path, entries = manifest.len(), "wrote safelist manifest");
    Ok(())
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, SafelistCliError> {
    Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|source| {
        SafelistCliError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| SafelistCliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
