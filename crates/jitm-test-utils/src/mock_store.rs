// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dismissal store that fails every operation.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jitm_core::{
    DismissalSnapshot, DismissalState, DismissalStore, HealthStatus, JitmError, MessageId,
    UserAction, UserId,
};

/// Store standing in for an unreachable backend.
///
/// Counts the calls it receives so tests can assert the store was (or was not) consulted.
#[derive(Debug, Default)]
pub struct FailingDismissalStore {
    calls: AtomicUsize,
}

impl FailingDismissalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, JitmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(JitmError::Storage {
            source: "dismissal backend unavailable".into(),
        })
    }
}

#[async_trait]
impl DismissalStore for FailingDismissalStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn health_check(&self) -> Result<HealthStatus, JitmError> {
        Ok(HealthStatus::Unhealthy("dismissal backend unavailable".into()))
    }

    async fn get(&self, _user: &UserId, _message: &MessageId) -> Result<DismissalState, JitmError> {
        self.fail()
    }

    async fn record(
        &self,
        _user: &UserId,
        _message: &MessageId,
        _action: UserAction,
    ) -> Result<(), JitmError> {
        self.fail()
    }

    async fn snapshot(&self, _user: &UserId) -> Result<DismissalSnapshot, JitmError> {
        self.fail()
    }
}
