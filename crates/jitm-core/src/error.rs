// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the JITM message engine.

use thiserror::Error;

/// The primary error type used across the store trait and the selection service.
///
/// An ineligible candidate is never an error: selection simply yields no
/// message. Errors are reserved for configuration bugs, unknown message ids
/// reported by clients, and collaborator failures.
#[derive(Debug, Error)]
pub enum JitmError {
    /// Configuration errors (invalid catalog, invalid settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Dismissal store errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A reported action referenced a message id that is not in the loaded catalog.
    #[error("message not found: {id}")]
    MessageNotFound { id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl JitmError {
    /// Returns true for the recoverable "unknown message id" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, JitmError::MessageNotFound { .. })
    }
}
