// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the JITM message engine.
//!
//! This crate provides the error type, the identifier and dismissal-state
//! types, and the [`DismissalStore`] trait that storage backends implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::JitmError;
pub use traits::DismissalStore;
pub use types::{
    DismissalSnapshot, DismissalState, HealthStatus, MessageId, UserAction, UserId,
};
