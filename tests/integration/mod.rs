//! Integration test suite for modelgen
//!
//! End-to-end tests of generation runs through the library API and through
//! the `modelgen` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generation**: Orchestrator runs over realistic requests (library API)
//! - **cli**: `generate`, `path` and `dump` commands, exit codes and error output

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod generation;
