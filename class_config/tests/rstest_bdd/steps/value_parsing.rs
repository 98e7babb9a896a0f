//! Parsing helpers for values written inline in feature files.

use anyhow::{Context, Result, anyhow};
use class_config::Config;
use test_helpers::text::normalize_scalar;

/// Parses a quoted JSON object into a [`Config`].
pub fn parse_config(raw: &str) -> Result<Config> {
    let text = normalize_scalar(raw);
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in step: {text}"))?;
    Config::from_value(&value).map_err(|err| anyhow!(err.to_string()))
}

/// Splits a comma-separated list, dropping empty items.
pub fn parse_list(raw: &str) -> Vec<String> {
    normalize_scalar(raw)
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Splits a dotted path such as `variants.size.sm`.
pub fn parse_path(raw: &str) -> Vec<String> {
    normalize_scalar(raw)
        .split('.')
        .map(str::to_owned)
        .collect()
}
