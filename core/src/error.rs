#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Variants double as the client-facing error kinds: the web crate maps each
//! one to an HTTP status and echoes the message of the client-side kinds
//! verbatim.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From, PartialEq, Eq)]
pub enum AppError {
    /// The request (or a document inside it) failed validation.
    #[from(ignore)]
    #[display("{_0}")]
    BadRequest(String),

    /// The addressed resource does not exist for the calling account.
    #[from(ignore)]
    #[display("{_0}")]
    NotFound(String),

    /// The caller could not be identified.
    #[from(ignore)]
    #[display("{_0}")]
    Unauthorized(String),

    /// Wrapper for Database string errors.
    #[from(ignore)]
    #[display("Database Error: {_0}")]
    Database(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Shorthand for [`AppError::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    /// Shorthand for [`AppError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    /// Returns true for kinds caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest(_) | AppError::NotFound(_) | AppError::Unauthorized(_)
        )
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
