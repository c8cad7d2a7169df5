// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Just-in-time message selection.
//!
//! This crate provides:
//! - [`PathPattern`]: `area:screen:event` patterns and the context matcher
//! - [`Catalog`]: the ordered, validated message catalog and its loader
//! - [`FilterChain`]: dismissal, threshold, plan, and variation eligibility filters
//! - [`Selector`]: first-match-wins selection over the catalog
//! - [`JitmService`]: the facade collaborators call to select and report actions
//!
//! Everything except [`JitmService`] is synchronous and free of I/O.

pub mod builtin;
pub mod catalog;
pub mod context;
pub mod filter;
pub mod message;
pub mod pattern;
pub mod selector;
pub mod service;

pub use builtin::{builtin_entries, setup_url};
pub use catalog::{Catalog, load_catalog, load_catalog_from_config};
pub use context::{Context, SiteMetrics};
pub use filter::{
    DismissalFilter, EligibilityFilter, FilterChain, FilterInput, PlanFilter, ThresholdFilter,
    VariationFilter,
};
pub use message::{MessageDefinition, SelectedMessage};
pub use pattern::{PathPattern, PatternError, Segment};
pub use selector::Selector;
pub use service::JitmService;
