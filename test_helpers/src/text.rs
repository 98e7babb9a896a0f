//! Shared text normalization helpers for behavioural test suites.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Normalizes a scalar placeholder by trimming and unquoting one outer layer.
#[must_use]
pub fn normalize_scalar(value: &str) -> String {
    unquote(value).trim().to_owned()
}

/// Returns `true` when both class strings hold the same tokens, ignoring
/// order, repeats and spacing.
#[must_use]
pub fn same_classes(left: &str, right: &str) -> bool {
    let mut left_tokens: Vec<&str> = left.split_whitespace().collect();
    let mut right_tokens: Vec<&str> = right.split_whitespace().collect();
    left_tokens.sort_unstable();
    left_tokens.dedup();
    right_tokens.sort_unstable();
    right_tokens.dedup();
    left_tokens == right_tokens
}
