//! Layered class-string configuration for utility-first UI kits.
//!
//! Component styles are described by loosely typed tables of class strings:
//! a `base` string, per-slot strings, `variants` tables, `compoundVariants`
//! rules and so on. This crate merges three such layers (built-in defaults,
//! application-wide overrides, and per-call overrides) into one final
//! [`Config`], and derives the minimal safelist of dynamic colour patterns a
//! stylesheet build must keep.
//!
//! ```rust
//! use class_config::{Config, ConfigMerger, MergeStrategy};
//! use serde_json::json;
//!
//! let default = Config::from_value(&json!({
//!     "wrapper": "p-2",
//!     "variants": { "size": { "sm": "text-sm", "lg": "text-lg" } }
//! }))?;
//! let global = Config::from_value(&json!({ "wrapper": "bg-white" }))?;
//!
//! let merged = ConfigMerger::default().merge(
//!     &default,
//!     Some(&global),
//!     None,
//!     MergeStrategy::Merge,
//! )?;
//! assert_eq!(merged.classes(&["wrapper"])?, "p-2 bg-white");
//! # Ok::<_, std::sync::Arc<class_config::StyleError>>(())
//! ```

mod context;
mod dedupe;
mod error;
mod extends;
mod merge;
mod result_ext;
pub mod safelist;
mod strategy;
mod value;

pub use context::StyleContext;
pub use dedupe::{ClassDeduper, TokenDeduper};
pub use error::{AggregatedErrors, StyleError};
pub use extends::{EXTENDS_CLOSE, EXTENDS_OPEN, ExtendsResolver, extends_tokens, strip_extends};
pub use merge::{CompoundVariantMerger, ConfigMerger, MergeProvenance, MergeWarning, Merged};
pub use result_ext::StyleResultExt;
pub use safelist::{COLOR_PLACEHOLDER, SafelistBuilder, SafelistPattern};
pub use strategy::MergeStrategy;
pub use value::{CompoundVariantRule, Config, ConfigValue, Discriminant, Scalar, keys};

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`std::sync::Arc`] so aggregated failures can
/// hold on to the individual errors they collect.
pub type StyleResult<T> = Result<T, std::sync::Arc<StyleError>>;
