//! Test helpers shared across crates.
//!
//! Provides `figment::Jail` plumbing for file-loading tests and text
//! normalization for comparing class strings and step arguments.

pub mod figment;
pub mod text;
