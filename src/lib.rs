//! modelgen - generate source files from abstract data models
//!
//! modelgen takes a set of [`models::Model`]s (typed fields plus per-action
//! access levels) and a set of [`models::Template`]s, and renders every
//! template into one or more files. Before rendering, each model is expanded
//! into an [`explicit::ExplicitModel`]: name variants for the model and every
//! field, field groups, access comparison descriptors, and (one hop deep)
//! resolved references, dependencies and referencing models.
//!
//! # Architecture
//!
//! - [`models`] - raw input types and the generation request
//! - [`names`] - casing variants of names and `{variant}` path substitution
//! - [`explicit`] - the explicit model builder and its per-run cache
//! - [`templating`] - the render engine trait, registry and the tera engine
//! - [`generator`] - the orchestrator producing ordered results
//! - [`config`] - generator settings from TOML and the environment
//! - [`core`] - numbered error types and user-facing error formatting
//! - [`cli`] - the `modelgen` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use modelgen::generator::Generator;
//! use modelgen::models::{Access, Accesses, Model, Template, TemplateInput};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut user = Model::new("u1", "User profile");
//! user.accesses = Accesses::uniform(Access::Guest);
//!
//! let template = Template::new(
//!     "src/{snake}.rs",
//!     "tera",
//!     TemplateInput::One,
//!     "pub struct {{ model.names.pascal }};",
//! );
//!
//! let results = Generator::default().run(&[template], &[user], None).await?;
//! assert_eq!(results[0].path, "src/user_profile.rs");
//! assert_eq!(results[0].content, "pub struct UserProfile;");
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod core;

// Model expansion
pub mod explicit;
pub mod models;
pub mod names;

// Rendering
pub mod generator;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
