//! Several configuration failures reported as one error.

use std::{error::Error, fmt, sync::Arc};

use super::StyleError;

/// Failures collected while loading the default and global configuration
/// files, in load order.
#[derive(Debug)]
pub struct AggregatedErrors(Vec<Arc<StyleError>>);

impl AggregatedErrors {
    /// Wrap `errors` as one aggregation.
    #[must_use]
    pub const fn new(errors: Vec<Arc<StyleError>>) -> Self {
        Self(errors)
    }

    /// Returns the collected errors in load order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Returns the number of collected errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = self.iter().enumerate();
        if let Some((_, first)) = entries.next() {
            write!(f, "1: {first}")?;
        }
        entries.try_for_each(|(idx, err)| write!(f, "\n{}: {err}", idx + 1))
    }
}

impl Error for AggregatedErrors {}
