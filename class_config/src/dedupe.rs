//! Class-string reconciliation boundary.
//!
//! Conflict resolution between utility classes (`p-2` vs `p-4`) is not this
//! crate's business: callers inject any function that reconciles a list of
//! class strings into one. [`TokenDeduper`] is the minimal stand-in used when
//! nothing else is supplied.

/// Reconciles an ordered list of class strings into one class string.
///
/// Implementations are expected to be pure, to split each input on
/// whitespace, to let later tokens win over earlier tokens of the same
/// family, and to join the survivors with single spaces.
pub trait ClassDeduper: Send + Sync {
    /// Reconcile `classes`, earliest first, into one class string.
    fn dedupe(&self, classes: &[&str]) -> String;
}

impl<F> ClassDeduper for F
where
    F: Fn(&[&str]) -> String + Send + Sync,
{
    fn dedupe(&self, classes: &[&str]) -> String {
        self(classes)
    }
}

/// Removes exact duplicate tokens, keeping each token's last occurrence.
///
/// # Examples
///
/// ```rust
/// use class_config::{ClassDeduper, TokenDeduper};
///
/// assert_eq!(TokenDeduper.dedupe(&["p-2 rounded", "bg-white p-2"]), "rounded bg-white p-2");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenDeduper;

impl ClassDeduper for TokenDeduper {
    fn dedupe(&self, classes: &[&str]) -> String {
        let tokens: Vec<&str> = classes
            .iter()
            .flat_map(|class| class.split_whitespace())
            .collect();
        let kept: Vec<&str> = tokens
            .iter()
            .enumerate()
            .filter(|&(idx, token)| !tokens.iter().skip(idx + 1).any(|later| later == token))
            .map(|(_, token)| *token)
            .collect();
        kept.join(" ")
    }
}
