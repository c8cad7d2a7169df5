// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message definitions and the selection result handed to presentation.

use jitm_core::MessageId;
use serde::Serialize;

use crate::pattern::PathPattern;

/// A validated catalog entry.
///
/// Display copy is opaque to the engine and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDefinition {
    pub id: MessageId,
    pub pattern: PathPattern,
    pub headline: String,
    pub description: String,
    pub cta_link: String,
    pub cta_label: String,
    /// Minimum published-post count for the message to be eligible.
    pub min_required_count: Option<u64>,
    /// Plan slugs the message is restricted to. Empty means every plan.
    pub plans: Vec<String>,
    /// Experiment branch the message belongs to. `None` means every branch.
    pub variation: Option<String>,
}

/// The chosen message, as consumed by a presentation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedMessage {
    pub id: String,
    pub headline: String,
    pub description: String,
    pub cta_link: String,
    pub cta_label: String,
}

impl From<&MessageDefinition> for SelectedMessage {
    fn from(def: &MessageDefinition) -> Self {
        Self {
            id: def.id.0.clone(),
            headline: def.headline.clone(),
            description: def.description.clone(),
            cta_link: def.cta_link.clone(),
            cta_label: def.cta_label.clone(),
        }
    }
}
