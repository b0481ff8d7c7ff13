//! Error types for the Navrail plugin.
//!
//! This module defines the centralized error type [`NavrailError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! None of these errors ever reach the user as a blocking dialog. Callers degrade
//! the affected feature (no-op section switch, default theme, skipped write) and
//! log the failure.

use thiserror::Error;

/// The main error type for Navrail plugin operations.
///
/// # Examples
///
/// ```
/// use navrail::NavrailError;
///
/// let err = NavrailError::UnknownSection("reports".to_string());
/// assert_eq!(err.to_string(), "Unknown section: reports");
/// ```
#[derive(Debug, Error)]
pub enum NavrailError {
    /// A section key was requested that the catalog does not contain.
    ///
    /// Section switches with an unknown key are no-ops; the previously rendered
    /// section stays on screen.
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the preference store fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme palette parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The navigation catalog could not be loaded or failed validation.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Communication with background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for Navrail operations.
pub type Result<T> = std::result::Result<T, NavrailError>;
