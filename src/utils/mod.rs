//! Utility modules shared across the transpiler.
//!
//! This module contains common utilities used throughout the codebase:
//! - Error types
//! - Source location tracking
//! - Pretty printing and code formatting

pub mod errors;
pub mod location;
pub mod pretty;

// Re-exports
pub use errors::*;
pub use location::{SourceLocation, Span};
pub use pretty::{CodeFormatter, PrettyPrint};
