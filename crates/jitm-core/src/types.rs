// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the engine, the stores, and the binary.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identity of the user a dismissal record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Stable identifier of a message definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Interaction state of a (user, message) pair.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DismissalState {
    /// No record exists; the user never interacted with the message.
    #[default]
    Unseen,
    Dismissed,
    Accepted,
}

impl DismissalState {
    /// Whether this state keeps the message from being shown again.
    pub fn suppresses(self) -> bool {
        !matches!(self, DismissalState::Unseen)
    }
}

/// An action a user can report against a displayed message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    Dismissed,
    Accepted,
}

impl From<UserAction> for DismissalState {
    fn from(action: UserAction) -> Self {
        match action {
            UserAction::Dismissed => DismissalState::Dismissed,
            UserAction::Accepted => DismissalState::Accepted,
        }
    }
}

/// Point-in-time view of one user's dismissal records.
///
/// Read from a [`DismissalStore`](crate::DismissalStore) before selection and
/// handed to the engine as plain data. Messages without a record are `Unseen`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DismissalSnapshot {
    states: HashMap<MessageId, DismissalState>,
}

impl DismissalSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state for a message id, replacing any earlier state.
    pub fn insert(&mut self, id: MessageId, state: DismissalState) {
        self.states.insert(id, state);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, id: &str, state: DismissalState) -> Self {
        self.insert(MessageId::from(id), state);
        self
    }

    pub fn state_of(&self, id: &str) -> DismissalState {
        self.states
            .get(&MessageId::from(id))
            .copied()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(MessageId, DismissalState)> for DismissalSnapshot {
    fn from_iter<I: IntoIterator<Item = (MessageId, DismissalState)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is operational but experiencing issues.
    Degraded(String),
    /// Store is not operational.
    Unhealthy(String),
}
