//! Error taxonomy for the submission handlers.
//!
//! [`ApiError`] is the only error a caller ever sees. Validation failures carry
//! their full detail; everything that goes wrong after validation is collapsed
//! into a fixed [`ApiError::Internal`] message, with the underlying
//! [`SubmissionError`] logged server-side.

use store::StoreError;
use thiserror::Error;

use crate::notify::NotifyError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The caller's input was rejected; resubmitting corrected input may succeed.
    #[error("{0}")]
    InvalidArgument(String),

    /// A downstream step failed; the message is a fixed retry-later string.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Error kind as reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "invalid-argument",
            ApiError::Internal(_) => "internal",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidArgument(message) => message,
            ApiError::Internal(message) => message,
        }
    }
}

/// Failure of a side effect after a submission was validated.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Failed to persist record: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to send notification: {0}")]
    Notify(#[from] NotifyError),
}
