//! Shared helpers for working with `figment::Jail` in tests.
//!
//! The jail runs its closure inside a fresh temporary working directory, so
//! configuration files can be created with relative paths and are removed
//! once the closure returns.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// Errors from the closure and from the jail itself are converted into
/// `anyhow::Error` values.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
#[allow(deprecated, reason = "figment::Jail is used for test isolation only")]
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        let value = f(j).map_err(|err| figment::Error::from(err.to_string()))?;
        output = Some(value);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure completed without producing a value"))
}
