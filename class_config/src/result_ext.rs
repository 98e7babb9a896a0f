//! Extensions for mapping errors to `StyleResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting error types into the crate's
//! `StyleResult<T>` alias (`Result<T, Arc<StyleError>>`).
//!
//! # Examples
//!
//! ```
//! use class_config::{StyleError, StyleResult, StyleResultExt};
//!
//! fn strategy(name: &str) -> StyleResult<()> {
//!     let outcome: Result<(), StyleError> = Err(StyleError::UnknownStrategy {
//!         value: name.to_owned(),
//!     });
//!     outcome.into_style()
//! }
//! assert!(strategy("squash").is_err());
//! ```

use std::sync::Arc;

use crate::{StyleError, StyleResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<StyleError>`
/// into a `StyleResult<T>`.
pub trait StyleResultExt<T> {
    /// Convert `Result<T, E>` into `StyleResult<T>` using `Into<StyleError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<StyleError>`.
    fn into_style(self) -> StyleResult<T>;
}

impl<T, E> StyleResultExt<T> for Result<T, E>
where
    E: Into<StyleError>,
{
    fn into_style(self) -> StyleResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
