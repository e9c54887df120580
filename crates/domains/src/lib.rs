//! # domains
//!
//! Entities, validators, error kinds and storage ports for the forum core.
//! Nothing in this crate performs I/O.

pub mod error;
mod fields;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
