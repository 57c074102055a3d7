//! Test utilities for modelgen
//!
//! This module provides helpers shared by unit and integration tests:
//! - Logging initialization that is safe to call from every test
//! - Builders for models, fields and templates
//!
//! # Example
//!
//! ```rust,no_run
//! use modelgen::models::TemplateInput;
//! use modelgen::test_utils::{FieldBuilder, ModelBuilder, template};
//!
//! let user = ModelBuilder::new("u1", "User")
//!     .field(FieldBuilder::string("email").unique().label())
//!     .build();
//! let index = template("src/{snake}.rs", TemplateInput::One, "{{ model.names.pascal }}");
//! ```

pub mod fixtures;

pub use fixtures::{FieldBuilder, ModelBuilder, template};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. The given level wins; without one the
/// `RUST_LOG` environment variable is used, and without either no logging is
/// installed.
///
/// ```bash
/// RUST_LOG=modelgen=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
