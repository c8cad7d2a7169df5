// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Eligibility filter chain.
//!
//! Each filter is an independent predicate that may veto a path-matched
//! candidate. The chain evaluates filters in a fixed order, cheapest first,
//! and stops at the first rejection. A rejection is the normal "not eligible"
//! outcome, not a failure: it is traced, never warned about.

use jitm_core::DismissalSnapshot;
use tracing::trace;

use crate::context::Context;
use crate::message::MessageDefinition;

/// Everything a filter may look at besides the candidate itself.
#[derive(Debug, Clone, Copy)]
pub struct FilterInput<'a> {
    pub context: &'a Context,
    /// The current user's dismissal records.
    pub dismissals: &'a DismissalSnapshot,
}

/// A single eligibility predicate.
pub trait EligibilityFilter: Send + Sync {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Returns `true` if the candidate may be shown.
    fn allows(&self, candidate: &MessageDefinition, input: &FilterInput<'_>) -> bool;
}

/// Rejects messages the user has already dismissed or accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct DismissalFilter;

impl EligibilityFilter for DismissalFilter {
    fn name(&self) -> &'static str {
        "dismissal"
    }

    fn allows(&self, candidate: &MessageDefinition, input: &FilterInput<'_>) -> bool {
        !input
            .dismissals
            .state_of(candidate.id.as_str())
            .suppresses()
    }
}

/// Rejects messages whose `min_required_count` exceeds the site's published count.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThresholdFilter;

impl EligibilityFilter for ThresholdFilter {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn allows(&self, candidate: &MessageDefinition, input: &FilterInput<'_>) -> bool {
        candidate
            .min_required_count
            .is_none_or(|min| input.context.site.published_count >= min)
    }
}

/// Rejects plan-restricted messages when the site is on another (or unknown) plan.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanFilter;

impl EligibilityFilter for PlanFilter {
    fn name(&self) -> &'static str {
        "plan"
    }

    fn allows(&self, candidate: &MessageDefinition, input: &FilterInput<'_>) -> bool {
        if candidate.plans.is_empty() {
            return true;
        }
        input
            .context
            .site
            .plan
            .as_deref()
            .is_some_and(|plan| candidate.plans.iter().any(|p| p == plan))
    }
}

/// Rejects branch-tagged messages that do not belong to the request's branch.
///
/// The request's branch is its override, else its assigned variation, else
/// `default_variation`.
#[derive(Debug, Clone)]
pub struct VariationFilter {
    default_variation: String,
}

impl VariationFilter {
    pub fn new(default_variation: impl Into<String>) -> Self {
        Self {
            default_variation: default_variation.into(),
        }
    }
}

impl EligibilityFilter for VariationFilter {
    fn name(&self) -> &'static str {
        "variation"
    }

    fn allows(&self, candidate: &MessageDefinition, input: &FilterInput<'_>) -> bool {
        match &candidate.variation {
            None => true,
            Some(branch) => branch == input.context.effective_variation(&self.default_variation),
        }
    }
}

/// Ordered, short-circuiting sequence of filters.
pub struct FilterChain {
    filters: Vec<Box<dyn EligibilityFilter>>,
}

impl FilterChain {
    /// The standard chain: dismissal, threshold, plan, variation.
    pub fn standard(default_variation: impl Into<String>) -> Self {
        Self {
            filters: vec![
                Box::new(DismissalFilter),
                Box::new(ThresholdFilter),
                Box::new(PlanFilter),
                Box::new(VariationFilter::new(default_variation)),
            ],
        }
    }

    /// A chain with explicit filters, evaluated in the given order.
    pub fn with_filters(filters: Vec<Box<dyn EligibilityFilter>>) -> Self {
        Self { filters }
    }

    /// Filter names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Returns `true` if every filter allows the candidate.
    pub fn is_eligible(&self, candidate: &MessageDefinition, input: &FilterInput<'_>) -> bool {
        match self.filters.iter().find(|f| !f.allows(candidate, input)) {
            Some(filter) => {
                trace!(
                    message_id = %candidate.id,
                    filter = filter.name(),
                    "candidate not eligible"
                );
                false
            }
            None => true,
        }
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.names())
            .finish()
    }
}
