// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dismissal store trait for persistence backends (SQLite, in-memory, etc.).

use async_trait::async_trait;

use crate::error::JitmError;
use crate::types::{DismissalSnapshot, DismissalState, HealthStatus, MessageId, UserAction, UserId};

/// Durable per-user memory of which messages were dismissed or accepted.
///
/// The engine reads through [`snapshot`](Self::snapshot) once per selection
/// and appends through [`record`](Self::record) when a user acts on a
/// message. Implementations own the persistence mechanics and must tolerate
/// concurrent reads and concurrent writes to distinct (user, message) keys.
/// Records are never deleted through this trait.
#[async_trait]
pub trait DismissalStore: Send + Sync + 'static {
    /// Returns the human-readable name of this store backend.
    fn name(&self) -> &str;

    /// Performs a health check and returns the store's current status.
    async fn health_check(&self) -> Result<HealthStatus, JitmError>;

    /// Returns the state for a single (user, message) pair.
    ///
    /// Pairs that were never recorded are [`DismissalState::Unseen`].
    async fn get(&self, user: &UserId, message: &MessageId) -> Result<DismissalState, JitmError>;

    /// Records a user action. A later action on the same pair replaces the state.
    async fn record(
        &self,
        user: &UserId,
        message: &MessageId,
        action: UserAction,
    ) -> Result<(), JitmError>;

    /// Returns every recorded state for one user.
    async fn snapshot(&self, user: &UserId) -> Result<DismissalSnapshot, JitmError>;
}
