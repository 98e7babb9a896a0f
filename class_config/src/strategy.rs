//! Merge strategy selection.

use std::fmt;
use std::str::FromStr;

use crate::value::{Config, ConfigValue, keys};
use crate::{StyleError, StyleResult, StyleResultExt};

/// Policy governing how the default, global and props layers combine.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MergeStrategy {
    /// Structural merge: class strings concatenate and pass through the
    /// deduper, tables merge key by key.
    #[default]
    Merge,
    /// Structural traversal where the highest-priority non-empty leaf wins.
    Replace,
    /// Whole-object substitution: the highest-priority non-empty layer wins.
    Overwrite,
}

impl MergeStrategy {
    /// Returns the configuration-friendly name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Replace => "replace",
            Self::Overwrite => "overwrite",
        }
    }

    /// Removes a top-level `strategy` key from `props` and parses it.
    ///
    /// Returns `fallback` when `props` carries no strategy.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownStrategy`] when the name is not
    /// recognised and [`StyleError::InvalidValue`] when the key does not hold
    /// a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use class_config::{Config, MergeStrategy};
    /// use serde_json::json;
    ///
    /// let mut props = Config::from_value(&json!({"strategy": "override", "base": "p-4"}))?;
    /// let strategy = MergeStrategy::from_props(&mut props, MergeStrategy::Merge)?;
    /// assert_eq!(strategy, MergeStrategy::Overwrite);
    /// assert!(props.get("strategy").is_none());
    /// # Ok::<_, std::sync::Arc<class_config::StyleError>>(())
    /// ```
    pub fn from_props(props: &mut Config, fallback: Self) -> StyleResult<Self> {
        match props.remove(keys::STRATEGY) {
            None => Ok(fallback),
            Some(ConfigValue::Str(name)) => name.parse::<Self>().into_style(),
            Some(other) => Err(StyleError::invalid_value(
                keys::STRATEGY,
                "strategy name",
                &other.to_value(),
            )),
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "replace" => Ok(Self::Replace),
            "overwrite" | "override" => Ok(Self::Overwrite),
            _ => Err(StyleError::UnknownStrategy {
                value: s.to_owned(),
            }),
        }
    }
}
