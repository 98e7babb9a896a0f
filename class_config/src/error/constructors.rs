//! Constructors and aggregation helpers for `StyleError`.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use super::{AggregatedErrors, StyleError};

impl StyleError {
    /// Combines `first` with any further failures.
    ///
    /// `first` is returned unchanged when `rest` is empty; otherwise every
    /// failure is wrapped, in order, in [`Self::Aggregate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use class_config::StyleError;
    ///
    /// let first = Arc::new(StyleError::UnknownStrategy { value: "squash".into() });
    /// let alone = StyleError::aggregate(Arc::clone(&first), None);
    /// assert!(Arc::ptr_eq(&alone, &first));
    ///
    /// let second = Arc::new(StyleError::CyclicExtends { cycle: "a -> a".into() });
    /// let both = StyleError::aggregate(first, Some(second));
    /// assert!(matches!(&*both, StyleError::Aggregate(errors) if errors.len() == 2));
    /// ```
    #[must_use]
    pub fn aggregate<I>(first: Arc<Self>, rest: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        let mut others = rest.into_iter().peekable();
        if others.peek().is_none() {
            return first;
        }
        let errors = std::iter::once(first).chain(others).collect();
        Arc::new(Self::Aggregate(Box::new(AggregatedErrors::new(errors))))
    }

    /// Construct an [`StyleError::InvalidValue`] describing `found`.
    #[must_use]
    pub fn invalid_value(path: &str, expected: &'static str, found: &Value) -> Arc<Self> {
        Arc::new(Self::InvalidValue {
            path: path.to_owned(),
            expected,
            found: json_kind(found),
        })
    }

    /// Construct an [`StyleError::InvalidRule`].
    #[must_use]
    pub fn invalid_rule(path: &str, index: usize, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::InvalidRule {
            path: path.to_owned(),
            index,
            message: message.into(),
        })
    }

    /// Construct a [`StyleError::File`] for `path`.
    #[must_use]
    pub fn file<E>(path: &Path, source: E) -> Arc<Self>
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }
}

/// Human-readable kind of a raw JSON value, used in error messages.
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}
