//! Lazy resolution of `{>key}` inheritance tokens in class strings.
//!
//! A token names a sibling key at the same configuration level. Merged
//! configs keep tokens verbatim; they are only resolved when a class string
//! is read.

use std::sync::Arc;

use crate::dedupe::ClassDeduper;
use crate::value::Config;
use crate::{StyleError, StyleResult};

/// Opening delimiter of an inheritance token.
pub const EXTENDS_OPEN: &str = "{>";
/// Closing delimiter of an inheritance token.
pub const EXTENDS_CLOSE: &str = "}";

/// Returns the key names referenced by `classes`, in order of appearance.
///
/// Unterminated tokens are ignored.
///
/// # Examples
///
/// ```rust
/// use class_config::extends_tokens;
///
/// assert_eq!(extends_tokens("{>base} text-sm {> icon }"), vec!["base", "icon"]);
/// assert!(extends_tokens("text-sm {>base").is_empty());
/// ```
#[must_use]
pub fn extends_tokens(classes: &str) -> Vec<&str> {
    token_spans(classes)
        .map(|(start, end)| {
            classes
                .get(start + EXTENDS_OPEN.len()..end - EXTENDS_CLOSE.len())
                .unwrap_or_default()
                .trim()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Removes every inheritance token and collapses the remaining whitespace.
#[must_use]
pub fn strip_extends(classes: &str) -> String {
    let mut literal = String::with_capacity(classes.len());
    let mut cursor = 0;
    for (start, end) in token_spans(classes) {
        literal.push_str(classes.get(cursor..start).unwrap_or_default());
        literal.push(' ');
        cursor = end;
    }
    literal.push_str(classes.get(cursor..).unwrap_or_default());
    literal.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrites every inheritance token into its compact `{>name}` form, so
/// whitespace splitting keeps each token whole.
pub(crate) fn compact_extends(classes: &str) -> String {
    let mut compact = String::with_capacity(classes.len());
    let mut cursor = 0;
    for (start, end) in token_spans(classes) {
        compact.push_str(classes.get(cursor..start).unwrap_or_default());
        let name = classes
            .get(start + EXTENDS_OPEN.len()..end - EXTENDS_CLOSE.len())
            .unwrap_or_default()
            .trim();
        compact.push_str(EXTENDS_OPEN);
        compact.push_str(name);
        compact.push_str(EXTENDS_CLOSE);
        cursor = end;
    }
    compact.push_str(classes.get(cursor..).unwrap_or_default());
    compact
}

fn token_spans(classes: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut offset = 0;
    std::iter::from_fn(move || {
        let rest = classes.get(offset..)?;
        let start = offset + rest.find(EXTENDS_OPEN)?;
        let after_open = start + EXTENDS_OPEN.len();
        let close = classes.get(after_open..)?.find(EXTENDS_CLOSE)?;
        let end = after_open + close + EXTENDS_CLOSE.len();
        offset = end;
        Some((start, end))
    })
}

/// Resolves inheritance tokens against one configuration level.
///
/// # Examples
///
/// ```rust
/// use class_config::{Config, ExtendsResolver, TokenDeduper};
/// use serde_json::json;
///
/// let level = Config::from_value(&json!({
///     "base": "rounded p-2",
///     "button": "{>base} bg-primary"
/// }))?;
/// let resolved = ExtendsResolver::new(&TokenDeduper).resolve(&level, "button")?;
/// assert_eq!(resolved, "rounded p-2 bg-primary");
/// # Ok::<_, std::sync::Arc<class_config::StyleError>>(())
/// ```
#[derive(Clone, Copy)]
pub struct ExtendsResolver<'d> {
    deduper: &'d dyn ClassDeduper,
}

impl<'d> ExtendsResolver<'d> {
    /// Create a resolver combining classes with `deduper`.
    #[must_use]
    pub const fn new(deduper: &'d dyn ClassDeduper) -> Self {
        Self { deduper }
    }

    /// Reads the class string of `key` in `level` with tokens resolved.
    ///
    /// Missing keys, and tokens naming missing keys, read as empty. A class
    /// string without tokens is returned untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::CyclicExtends`] when references loop back on
    /// themselves.
    pub fn resolve(&self, level: &Config, key: &str) -> StyleResult<String> {
        let mut stack = Vec::new();
        self.resolve_key(level, key, &mut stack)
    }

    /// Resolves the tokens of an arbitrary class string against `level`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::CyclicExtends`] when references loop back on
    /// themselves.
    pub fn expand(&self, level: &Config, classes: &str) -> StyleResult<String> {
        let mut stack = Vec::new();
        self.expand_with(level, classes, &mut stack)
    }

    fn resolve_key<'a>(
        &self,
        level: &'a Config,
        key: &'a str,
        stack: &mut Vec<&'a str>,
    ) -> StyleResult<String> {
        if stack.contains(&key) {
            let mut cycle = stack.clone();
            cycle.push(key);
            return Err(Arc::new(StyleError::CyclicExtends {
                cycle: cycle.join(" -> "),
            }));
        }
        let classes = level.class_string(key).unwrap_or_default();
        stack.push(key);
        let resolved = self.expand_with(level, classes, stack);
        stack.pop();
        resolved
    }

    fn expand_with<'a>(
        &self,
        level: &'a Config,
        classes: &'a str,
        stack: &mut Vec<&'a str>,
    ) -> StyleResult<String> {
        let tokens = extends_tokens(classes);
        if tokens.is_empty() {
            return Ok(classes.to_owned());
        }
        let mut parts = Vec::with_capacity(tokens.len() + 1);
        for name in tokens {
            let inherited = self.resolve_key(level, name, stack)?;
            if inherited.is_empty() {
                tracing::debug!(key = name, "extends token names an empty or missing key");
            }
            parts.push(inherited);
        }
        parts.push(strip_extends(classes));
        let pieces: Vec<&str> = parts
            .iter()
            .map(String::as_str)
            .filter(|part| !part.trim().is_empty())
            .collect();
        Ok(self.deduper.dedupe(&pieces))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{ExtendsResolver, compact_extends, extends_tokens, strip_extends};
    use crate::{Config, StyleError, TokenDeduper};

    fn level() -> Config {
        Config::from_value(&json!({
            "base": "rounded p-2",
            "leading": "{>base} size-4",
            "trailing": "{>leading} ms-auto",
            "button": "{>base} {>missing} rounded bg-primary",
            "icon": { "base": "{>leading} shrink-0" },
            "loop": "{>loop} x",
            "ping": "{>pong} a",
            "pong": "{>ping} b"
        }))
        .expect("level ingests")
    }

    #[rstest]
    #[case("text-sm", "text-sm")]
    #[case("{>base}", "")]
    #[case("  a {>x}   b {>y} ", "a b")]
    #[case("a {>unterminated", "a {>unterminated")]
    fn strips_tokens(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_extends(input), expected);
    }

    #[rstest]
    #[case("{> icon } px-2", "{>icon} px-2")]
    #[case("{>base}  text-sm", "{>base}  text-sm")]
    #[case("a {> unterminated", "a {> unterminated")]
    fn compacts_spaced_tokens(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(compact_extends(input), expected);
    }

    #[rstest]
    fn tokens_require_a_name() {
        assert!(extends_tokens("{>} {>  }").is_empty());
    }

    #[rstest]
    #[case("base", "rounded p-2")]
    #[case("leading", "rounded p-2 size-4")]
    #[case("trailing", "rounded p-2 size-4 ms-auto")]
    #[case("button", "p-2 rounded bg-primary")]
    #[case("icon", "rounded p-2 size-4 shrink-0")]
    #[case("absent", "")]
    fn resolves_sibling_references(#[case] key: &str, #[case] expected: &str) {
        let resolved = ExtendsResolver::new(&TokenDeduper)
            .resolve(&level(), key)
            .expect("resolution succeeds");
        assert_eq!(resolved, expected);
    }

    #[rstest]
    fn raw_strings_without_tokens_are_returned_verbatim() {
        let level = Config::from_value(&json!({"base": "  p-2   p-2 "})).expect("ingests");
        let resolved = ExtendsResolver::new(&TokenDeduper)
            .resolve(&level, "base")
            .expect("resolution succeeds");
        assert_eq!(resolved, "  p-2   p-2 ");
    }

    #[rstest]
    #[case("loop", "loop -> loop")]
    #[case("ping", "ping -> pong -> ping")]
    fn rejects_cycles(#[case] key: &str, #[case] expected: &str) {
        let err = ExtendsResolver::new(&TokenDeduper)
            .resolve(&level(), key)
            .expect_err("cycle must be rejected");
        assert!(matches!(&*err, StyleError::CyclicExtends { cycle } if cycle == expected));
    }

    #[rstest]
    fn expands_free_standing_class_strings() {
        let resolved = ExtendsResolver::new(&TokenDeduper)
            .expand(&level(), "{>base} shadow")
            .expect("expansion succeeds");
        assert_eq!(resolved, "rounded p-2 shadow");
    }
}
