//! Core types for modelgen
//!
//! This module holds the error taxonomy shared by every layer:
//! - [`GeneratorError`] - typed, numbered errors raised by generation runs
//! - [`ErrorPayload`] - serializable boundary form of an error
//! - [`ErrorContext`] - user-friendly wrapper with suggestions for the CLI
//! - [`user_friendly_error`] - convert any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # Example
//!
//! ```rust
//! use modelgen::core::{GeneratorError, ErrorKind};
//!
//! let error = GeneratorError::Timeout { timeout_ms: 1000 };
//! assert_eq!(error.code(), 2005);
//! assert_eq!(error.kind(), ErrorKind::Timeout);
//! ```

pub mod error;
mod error_formatting;

pub use error::{ErrorContext, ErrorKind, ErrorPayload, GeneratorError};
pub use error_formatting::{create_error_context, user_friendly_error};
