//! Non-fatal merge diagnostics.

use std::fmt;

use thiserror::Error;

/// Layer a configuration value came from, lowest priority first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[non_exhaustive]
pub enum MergeProvenance {
    /// Built-in component defaults.
    Default,
    /// Application-wide overrides.
    Global,
    /// Per-call overrides.
    Props,
}

impl MergeProvenance {
    /// All layers in priority order, lowest first.
    pub const ALL: [Self; 3] = [Self::Default, Self::Global, Self::Props];

    /// Returns the lowercase layer name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Global => "global",
            Self::Props => "props",
        }
    }
}

impl fmt::Display for MergeProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic raised while merging; the merge still completes.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum MergeWarning {
    /// `compoundVariants` did not hold a list and was treated as empty.
    #[error("'{path}' in the {layer} layer is not a list of rules; treating it as empty")]
    MalformedCompoundVariants {
        /// Dotted path of the key.
        path: String,
        /// Layer holding the malformed value.
        layer: MergeProvenance,
    },

    /// Per-call config tried to set a build-time-only key.
    #[error("'{path}' cannot be set per call; the props value was ignored")]
    PropsSafelistIgnored {
        /// Dotted path of the key.
        path: String,
    },

    /// More than one layer set the nested-component marker.
    #[error("'{path}' is set by {layers:?}; only the {winner} layer's value is kept")]
    ComponentConflict {
        /// Dotted path of the key.
        path: String,
        /// Every layer that set the key.
        layers: Vec<MergeProvenance>,
        /// Layer whose value was kept.
        winner: MergeProvenance,
    },
}
