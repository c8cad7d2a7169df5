// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local dismissal store.
//!
//! Records live only as long as the store. Useful for embedding the engine
//! where durability is handled elsewhere, and for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use jitm_core::{
    DismissalSnapshot, DismissalState, DismissalStore, HealthStatus, JitmError, MessageId,
    UserAction, UserId,
};

/// In-memory [`DismissalStore`] keyed by user.
#[derive(Debug, Default)]
pub struct MemoryDismissalStore {
    records: DashMap<UserId, HashMap<MessageId, DismissalState>>,
}

impl MemoryDismissalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DismissalStore for MemoryDismissalStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> Result<HealthStatus, JitmError> {
        Ok(HealthStatus::Healthy)
    }

    async fn get(&self, user: &UserId, message: &MessageId) -> Result<DismissalState, JitmError> {
        Ok(self
            .records
            .get(user)
            .and_then(|records| records.get(message).copied())
            .unwrap_or_default())
    }

    async fn record(
        &self,
        user: &UserId,
        message: &MessageId,
        action: UserAction,
    ) -> Result<(), JitmError> {
        self.records
            .entry(user.clone())
            .or_default()
            .insert(message.clone(), action.into());
        Ok(())
    }

    async fn snapshot(&self, user: &UserId) -> Result<DismissalSnapshot, JitmError> {
        Ok(self
            .records
            .get(user)
            .map(|records| {
                records
                    .iter()
                    .map(|(id, state)| (id.clone(), *state))
                    .collect()
            })
            .unwrap_or_default())
    }
}
