// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message selection: catalog → matcher → filter chain.
//!
//! The selector walks the catalog in order and returns the first definition
//! whose path pattern matches the context and which passes every eligibility
//! filter. Catalog order is the sole tie-break; there is no scoring. Given the
//! same catalog, context, and dismissal snapshot the result is always the same.

use jitm_core::DismissalSnapshot;
use tracing::debug;

use crate::catalog::Catalog;
use crate::context::Context;
use crate::filter::{FilterChain, FilterInput};
use crate::message::MessageDefinition;

/// Stateless selection engine; safe to share across concurrent requests.
#[derive(Debug)]
pub struct Selector {
    chain: FilterChain,
}

impl Selector {
    /// Create a selector with the standard filter chain.
    pub fn new(default_variation: impl Into<String>) -> Self {
        Self {
            chain: FilterChain::standard(default_variation),
        }
    }

    /// Create a selector with a custom filter chain.
    pub fn with_chain(chain: FilterChain) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    /// Select at most one message for the context.
    ///
    /// Returns `None` when nothing matches, when every match is ineligible, or
    /// when the catalog is empty; callers cannot and need not tell these apart.
    pub fn select<'c>(
        &self,
        catalog: &'c Catalog,
        context: &Context,
        dismissals: &DismissalSnapshot,
    ) -> Option<&'c MessageDefinition> {
        let input = FilterInput {
            context,
            dismissals,
        };

        let selected = catalog
            .iter()
            .filter(|candidate| candidate.pattern.matches(context))
            .find(|candidate| self.chain.is_eligible(candidate, &input));

        match selected {
            Some(message) => debug!(
                message_id = %message.id,
                area = %context.area,
                screen = %context.screen,
                "message selected"
            ),
            None => debug!(
                area = %context.area,
                screen = %context.screen,
                "no message selected"
            ),
        }

        selected
    }
}
