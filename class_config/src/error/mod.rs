//! Error types produced while ingesting, merging and resolving configs.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::StyleError;

pub(crate) use constructors::json_kind;
