//! Error handling for modelgen
//!
//! Every failure that crosses the generator boundary is a [`GeneratorError`].
//! Each variant carries a stable numeric code and an [`ErrorKind`] so callers
//! can branch without matching on message text:
//!
//! | kind          | code | raised when                                        |
//! |---------------|------|----------------------------------------------------|
//! | Internal      | 2001 | any unexpected failure (wrapped)                   |
//! | Configuration | 2002 | a template names an unregistered render engine     |
//! | Request       | 2003 | the generation request cannot be parsed or is bad  |
//! | Evaluation    | 2004 | a template raised an error while rendering         |
//! | Timeout       | 2005 | a render exceeded the configured time budget       |
//!
//! All of them are fatal to the current run: the orchestrator stops at the
//! first failing template/model pair and returns no partial output.
//!
//! For CLI display, [`ErrorContext`] wraps an error with an optional suggestion
//! and details, and [`user_friendly_error`](super::user_friendly_error) turns
//! any [`anyhow::Error`] into one.

use colored::Colorize;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The error type of generation runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Unexpected failure, e.g. a render task that panicked
    #[error("Internal generator error: {message}")]
    Internal {
        message: String,
    },

    /// The template's engine identifier is not registered
    #[error("Unknown engine: {engine}")]
    UnknownEngine {
        engine: String,
        /// Closest registered engine name, if any is reasonably close
        suggestion: Option<String>,
    },

    /// The request could not be parsed or references something that does not exist
    #[error("Invalid generation request: {reason}")]
    InvalidRequest {
        reason: String,
    },

    /// The template failed while being evaluated
    #[error("{message}")]
    Evaluation {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
        /// Path of the template that failed, attached by the orchestrator
        file: Option<String>,
    },

    /// Rendering took longer than the configured budget
    #[error("Template processing timed out ({timeout_ms}ms)")]
    Timeout {
        timeout_ms: u64,
    },
}

/// Coarse classification of [`GeneratorError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Internal,
    Configuration,
    Request,
    Evaluation,
    Timeout,
}

impl GeneratorError {
    /// Wrap any displayable failure as an internal error.
    pub fn internal(error: impl fmt::Display) -> Self {
        GeneratorError::Internal {
            message: error.to_string(),
        }
    }

    /// Stable numeric code of this error.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Internal => 2001,
            ErrorKind::Configuration => 2002,
            ErrorKind::Request => 2003,
            ErrorKind::Evaluation => 2004,
            ErrorKind::Timeout => 2005,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            GeneratorError::Internal {
                ..
            } => ErrorKind::Internal,
            GeneratorError::UnknownEngine {
                ..
            } => ErrorKind::Configuration,
            GeneratorError::InvalidRequest {
                ..
            } => ErrorKind::Request,
            GeneratorError::Evaluation {
                ..
            } => ErrorKind::Evaluation,
            GeneratorError::Timeout {
                ..
            } => ErrorKind::Timeout,
        }
    }

    /// Name used for this error at the system boundary.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Internal => "GeneratorInternalError",
            ErrorKind::Configuration => "GeneratorConfigurationError",
            ErrorKind::Request => "GeneratorRequestError",
            ErrorKind::Evaluation => "GeneratorEvaluationError",
            ErrorKind::Timeout => "GeneratorTimeoutError",
        }
    }

    /// Human-readable position details of an evaluation error.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        let GeneratorError::Evaluation {
            message,
            line,
            column,
            file,
        } = self
        else {
            return None;
        };

        let mut details = format!("Error: {message}.");
        if let Some(line) = line {
            details.push_str(&format!(" Line: {line}"));
        }
        if let Some(column) = column {
            details.push_str(&format!(", Column: {column}"));
        }
        if let Some(file) = file {
            details.push_str(&format!(". File: {file}"));
        }
        Some(details)
    }

    /// Attach the originating template path to an evaluation error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_file(self, path: &str) -> Self {
        match self {
            GeneratorError::Evaluation {
                message,
                line,
                column,
                ..
            } => GeneratorError::Evaluation {
                message,
                line,
                column,
                file: Some(path.to_string()),
            },
            other => other,
        }
    }

    /// Serializable boundary representation of this error.
    #[must_use]
    pub fn payload(&self) -> ErrorPayload {
        let (line, column, file) = match self {
            GeneratorError::Evaluation {
                line,
                column,
                file,
                ..
            } => (*line, *column, file.clone()),
            _ => (None, None, None),
        };

        ErrorPayload {
            code: self.code(),
            name: self.name(),
            kind: self.kind(),
            message: self.to_string(),
            details: self.details(),
            line,
            column,
            file,
        }
    }
}

/// Boundary representation of a [`GeneratorError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub code: u16,
    pub name: &'static str,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// A [`GeneratorError`] with user-facing guidance.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: GeneratorError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: GeneratorError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{} [{}]: {}", "error".red().bold(), self.error.code(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}
