//! # Manifest Domain
//!
//! Wire types and error model for the manifest exception processing API.
//!
//! This crate contains:
//! - Batch protocol types (token, submission, status envelope)
//! - Extracted-manifest payload types (shipments, summary)
//! - The `ProcessingError` taxonomy and `Result` alias
//! - Protocol constants and default timings
//!
//! ## Architecture
//! - No dependencies on other manifest crates
//! - Only external dependencies allowed
//! - Pure data structures; no I/O

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
