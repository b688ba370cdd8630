//! Core types for misogi
//!
//! This is the foundation crate (Layer 0) that all other misogi crates depend on.
//! It provides:
//! - Base error types
//! - Core behavioral traits (`ToolResolver`)
//!
//! This crate has no dependencies on other misogi crates.

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::ToolResolver;
