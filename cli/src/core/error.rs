//! # roledoc Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout roledoc. Every failure
//! of a render run is fatal: errors are propagated with `?` up to `main`, which
//! prints them once and exits with a non-zero status.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `RoledocError`: A custom error enum using `thiserror` for domain-specific failures
//! - `Result<T>`: A type alias for `anyhow::Result<T>` so I/O errors can carry context
//!
//! The error types cover:
//! - Configuration errors
//! - Filesystem errors (enumeration, directory creation, reads and writes)
//! - Role data loading errors
//! - Template syntax, undefined reference and other render errors
//! - Output encoding errors
//! - A user declining the overwrite confirmation
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !root.is_dir() {
//!     anyhow::bail!(RoledocError::FileSystem(format!(
//!         "Template directory not found: {}",
//!         root.display()
//!     )));
//! }
//!
//! // Add context to I/O errors using anyhow
//! let content = fs::read(&path)
//!     .with_context(|| format!("Failed to read template file '{}'", path.display()))?;
//!
//! // Inspect the concrete error in tests
//! let err = result.unwrap_err();
//! assert!(matches!(
//!     err.downcast_ref::<RoledocError>(),
//!     Some(RoledocError::UndefinedReference { .. })
//! ));
//! ```
//!
use thiserror::Error;

/// Custom error type for roledoc.
#[derive(Error, Debug)]
pub enum RoledocError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Role data error: {0}")]
    DataSource(String),

    #[error("Template syntax error while loading file: '{file}'\n{message}")]
    TemplateSyntax { file: String, message: String },

    #[error("Undefined reference while rendering file: '{file}'\n{message}")]
    UndefinedReference { file: String, message: String },

    #[error("Template rendering error in file: '{file}'\n{message}")]
    TemplateRender { file: String, message: String },

    #[error("Unable to encode special characters\n{0}")]
    Encoding(String),

    #[error("Aborted...")]
    UserAbort,
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
