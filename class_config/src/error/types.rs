//! Primary error enum for configuration ingestion and merging.

use std::path::PathBuf;

use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors raised for structurally invalid configuration.
///
/// These indicate authoring mistakes rather than transient conditions, so the
/// engine reports them loudly instead of coercing the offending value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StyleError {
    /// A key holds a value of the wrong kind.
    #[error("invalid value at '{path}': expected {expected}, found {found}")]
    InvalidValue {
        /// Dotted path of the offending key.
        path: String,
        /// Description of the accepted value kinds.
        expected: &'static str,
        /// Kind of the value that was found.
        found: &'static str,
    },

    /// A compound variant rule could not be interpreted.
    #[error("invalid compound variant rule {index} at '{path}': {message}")]
    InvalidRule {
        /// Dotted path of the `compoundVariants` key.
        path: String,
        /// Position of the rule within its list.
        index: usize,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// Sources disagree on whether a key inside a `variants` table is a
    /// class string or a nested table.
    #[error("variant option '{path}' is a class string in one layer and a table in another")]
    ShapeMismatch {
        /// Dotted path of the offending key.
        path: String,
    },

    /// Cycle detected while resolving `{>key}` references.
    #[error("cyclic extends detected: {cycle}")]
    CyclicExtends {
        /// Chain of keys participating in the cycle.
        cycle: String,
    },

    /// A merge strategy name was not recognised.
    #[error("unknown merge strategy '{value}'; expected merge, replace or overwrite")]
    UnknownStrategy {
        /// The rejected strategy name.
        value: String,
    },

    /// Error reading or parsing a configuration or source file.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying error reported while reading or parsing.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A discovery pattern failed to compile.
    #[error("invalid discovery pattern for component '{component}': {source}")]
    Pattern {
        /// Component the pattern was built for.
        component: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex_lite::Error,
    },

    /// Multiple errors occurred while loading configuration.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
