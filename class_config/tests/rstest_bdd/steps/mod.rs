//! Behavioural step modules registered with `rstest-bdd`.

pub mod extends_steps;
pub mod merge_steps;
pub mod safelist_steps;
pub mod value_parsing;
