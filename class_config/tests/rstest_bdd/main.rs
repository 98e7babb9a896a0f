//! `rstest-bdd` behavioural suite for `class_config`.
//!
//! Fixtures hold per-scenario state, [`steps`] registers the step
//! implementations and [`scenarios`] binds the `.feature` files under
//! `tests/features` to them.

mod fixtures;
mod scenarios;
mod steps;
