//! Error formatting utilities for modelgen
//!
//! This module converts arbitrary errors into user-friendly [`ErrorContext`]s
//! with actionable suggestions for CLI output.

use super::error::{ErrorContext, GeneratorError};

/// Keywords that indicate file-system related errors
const IO_ERROR_KEYWORDS: &[&str] = &["Failed to read", "Failed to write", "Failed to create"];

/// Convert any error into a user-friendly format with contextual suggestions
///
/// The error chain is walked looking for a [`GeneratorError`]; the first one
/// found decides the suggestion. Anything else is reported as an internal
/// error carrying the full context chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current_error: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(generator_error) = current_error.downcast_ref::<GeneratorError>() {
            let context = create_error_context(generator_error);
            // Keep the outer context (e.g. which file was being read) visible
            return if error.chain().count() > 1 && context.details.is_none() {
                context.with_details(format!("{error:#}"))
            } else {
                context
            };
        }

        match current_error.source() {
            Some(source) => current_error = source,
            None => break,
        }
    }

    let error_msg = format!("{error:#}");

    if error.downcast_ref::<std::io::Error>().is_some()
        || IO_ERROR_KEYWORDS.iter().any(|&keyword| error_msg.contains(keyword))
    {
        return ErrorContext::new(GeneratorError::internal(&error_msg))
            .with_suggestion("Check that the path exists and you have the necessary permissions");
    }

    ErrorContext::new(GeneratorError::internal(error_msg))
        .with_suggestion("Check the error message above for more details")
}

/// Create a user-friendly error context from a [`GeneratorError`]
pub fn create_error_context(error: &GeneratorError) -> ErrorContext {
    match error {
        GeneratorError::UnknownEngine {
            suggestion,
            ..
        } => {
            let context = ErrorContext::new(error.clone());
            match suggestion {
                Some(name) => context.with_suggestion(format!("Did you mean '{name}'?")),
                None => context.with_suggestion("Set the template's engine to a registered engine such as 'tera'"),
            }
        }
        GeneratorError::InvalidRequest {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check that every model has an id, a name and an accesses map, and every template has path, engine and input"),
        GeneratorError::Evaluation {
            ..
        } => {
            let context = ErrorContext::new(error.clone())
                .with_suggestion("Check your template syntax and variable names");
            match error.details() {
                Some(details) => context.with_details(details),
                None => context,
            }
        }
        GeneratorError::Timeout {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Simplify the template or raise timeout_ms in the configuration"),
        GeneratorError::Internal {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Please report this issue if it persists"),
    }
}
