//! Core types shared across the crate.
//!
//! Currently this is the error layer: [`HeadContextError`] for library code and
//! [`ErrorContext`] / [`user_friendly_error`] for presenting failures on the command line.

pub mod error;

pub use error::{ErrorContext, HeadContextError, format_tera_error, user_friendly_error};

/// Result alias used by the library API.
pub type Result<T, E = HeadContextError> = std::result::Result<T, E>;
