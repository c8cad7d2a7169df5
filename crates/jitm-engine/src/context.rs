// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request selection context.
//!
//! A [`Context`] is built fresh by the caller for every selection and is never
//! persisted. Everything the engine needs to know about the site is carried
//! in [`SiteMetrics`]; the engine never reaches into host state itself.

use serde::{Deserialize, Serialize};

/// Read-only snapshot of site state used by threshold and plan checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMetrics {
    /// Number of published posts.
    pub published_count: u64,
    /// Slug of the site's current plan, if known.
    pub plan: Option<String>,
}

/// The caller's current location, site snapshot, and experiment branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub area: String,
    pub screen: String,
    /// Trigger event. A context without one reduces to two segments.
    pub event: Option<String>,
    pub site: SiteMetrics,
    /// Forced experiment branch; takes precedence over `assigned_variation`.
    pub variation_override: Option<String>,
    /// Branch chosen by the external randomized assignment.
    pub assigned_variation: Option<String>,
}

impl Context {
    pub fn new(area: impl Into<String>, screen: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            screen: screen.into(),
            event: None,
            site: SiteMetrics::default(),
            variation_override: None,
            assigned_variation: None,
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_published_count(mut self, count: u64) -> Self {
        self.site.published_count = count;
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.site.plan = Some(plan.into());
        self
    }

    pub fn with_site(mut self, site: SiteMetrics) -> Self {
        self.site = site;
        self
    }

    pub fn with_variation_override(mut self, variation: impl Into<String>) -> Self {
        self.variation_override = Some(variation.into());
        self
    }

    pub fn with_assigned_variation(mut self, variation: impl Into<String>) -> Self {
        self.assigned_variation = Some(variation.into());
        self
    }

    /// The location reduced to pattern segments: `[area, screen]` or
    /// `[area, screen, event]`.
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec![self.area.as_str(), self.screen.as_str()];
        if let Some(event) = &self.event {
            segments.push(event.as_str());
        }
        segments
    }

    /// The branch this request belongs to: override, then assignment, then `default`.
    pub fn effective_variation<'a>(&'a self, default: &'a str) -> &'a str {
        self.variation_override
            .as_deref()
            .or(self.assigned_variation.as_deref())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_include_event_only_when_present() {
        let two = Context::new("wp", "upload");
        assert_eq!(two.segments(), vec!["wp", "upload"]);

        let three = two.with_event("admin_notices");
        assert_eq!(three.segments(), vec!["wp", "upload", "admin_notices"]);
    }

    #[test]
    fn override_beats_assignment_beats_default() {
        let ctx = Context::new("wp", "upload");
        assert_eq!(ctx.effective_variation("original"), "original");

        let ctx = ctx.with_assigned_variation("treatment");
        assert_eq!(ctx.effective_variation("original"), "treatment");

        let ctx = ctx.with_variation_override("forced");
        assert_eq!(ctx.effective_variation("original"), "forced");
    }

    #[test]
    fn site_builders_fill_metrics() {
        let ctx = Context::new("wp", "edit-post")
            .with_published_count(5)
            .with_plan("free");
        assert_eq!(ctx.site.published_count, 5);
        assert_eq!(ctx.site.plan.as_deref(), Some("free"));

        let replaced = ctx.with_site(SiteMetrics::default());
        assert_eq!(replaced.site, SiteMetrics::default());
    }
}
