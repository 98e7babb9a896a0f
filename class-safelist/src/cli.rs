//! Command-line interface definitions for `class-safelist`.

use camino::Utf8PathBuf;
use clap::Parser;

use class_config::safelist::{DEFAULT_TAG_PREFIX, NEUTRAL_COLOR};

/// Parsed CLI arguments for `class-safelist`.
#[derive(Debug, Parser)]
#[command(name = "class-safelist")]
#[command(about = "Generate the dynamic colour safelist for component styles")]
#[command(version)]
pub struct Args {
    /// Built-in component defaults (JSON or TOML).
    #[arg(long, value_name = "path")]
    pub config: Utf8PathBuf,
    /// Application-wide overrides (JSON or TOML).
    #[arg(long, value_name = "path")]
    pub global: Option<Utf8PathBuf>,
    /// Project directory scanned for component usage.
    #[arg(long, value_name = "dir", default_value = ".")]
    pub root: Utf8PathBuf,
    /// Prefix of component tag names, as in `UButton`.
    #[arg(long, value_name = "prefix", default_value = DEFAULT_TAG_PREFIX)]
    pub prefix: String,
    /// Source file extensions to scan (repeat for several).
    #[arg(long = "ext", value_name = "ext", default_values_t = default_extensions())]
    pub extensions: Vec<String>,
    /// Default colour that never needs safelisting.
    #[arg(long, value_name = "color", default_value = NEUTRAL_COLOR)]
    pub neutral: String,
    /// Manifest destination; stdout when omitted.
    #[arg(long, value_name = "path")]
    pub out: Option<Utf8PathBuf>,
}

fn default_extensions() -> Vec<String> {
    ["vue", "ts", "js", "tsx", "jsx"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}
