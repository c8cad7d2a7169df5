// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service facade tying the catalog, the selector, and a dismissal store together.
//!
//! The service performs the only I/O around a selection (reading the user's
//! dismissal snapshot) and then hands plain data to the synchronous
//! [`Selector`]. The catalog sits behind an [`ArcSwap`] so it can be replaced
//! wholesale without disturbing in-flight selections.

use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use jitm_config::JitmConfig;
use jitm_core::{DismissalStore, JitmError, MessageId, UserAction, UserId};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::context::Context;
use crate::message::SelectedMessage;
use crate::selector::Selector;

/// Entry point for presentation and action-reporting collaborators.
pub struct JitmService {
    catalog: ArcSwap<Catalog>,
    selector: Selector,
    store: Arc<dyn DismissalStore>,
    forced_variation: ArcSwapOption<String>,
}

impl JitmService {
    pub fn new(catalog: Catalog, selector: Selector, store: Arc<dyn DismissalStore>) -> Self {
        Self {
            catalog: ArcSwap::from_pointee(catalog),
            selector,
            store,
            forced_variation: ArcSwapOption::empty(),
        }
    }

    /// Build a service whose selector uses the configured default variation.
    pub fn from_config(config: &JitmConfig, catalog: Catalog, store: Arc<dyn DismissalStore>) -> Self {
        Self::new(
            catalog,
            Selector::new(config.engine.default_variation.clone()),
            store,
        )
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.load_full()
    }

    /// Replace the whole catalog. Selections already running keep the snapshot they loaded.
    pub fn replace_catalog(&self, catalog: Catalog) {
        let count = catalog.len();
        self.catalog.store(Arc::new(catalog));
        info!(count, "message catalog replaced");
    }

    /// Force every subsequent selection on this service into `variation`,
    /// unless the request's context already carries its own override.
    pub fn force_variation(&self, variation: impl Into<String>) {
        let variation = variation.into();
        debug!(variation = %variation, "variation forced");
        self.forced_variation.store(Some(Arc::new(variation)));
    }

    pub fn clear_forced_variation(&self) {
        self.forced_variation.store(None);
    }

    pub fn forced_variation(&self) -> Option<String> {
        self.forced_variation.load_full().map(|v| v.as_ref().clone())
    }

    /// Select at most one message for `user` in `context`.
    pub async fn select(
        &self,
        user: &UserId,
        context: &Context,
    ) -> Result<Option<SelectedMessage>, JitmError> {
        let catalog = self.catalog.load_full();
        if catalog.is_empty() {
            return Ok(None);
        }

        let dismissals = self.store.snapshot(user).await?;

        let forced = self.forced_variation.load_full();
        let selected = match (&context.variation_override, forced) {
            (None, Some(variation)) => {
                let context = context.clone().with_variation_override(variation.as_ref().clone());
                self.selector.select(&catalog, &context, &dismissals)
            }
            _ => self.selector.select(&catalog, context, &dismissals),
        };

        Ok(selected.map(SelectedMessage::from))
    }

    /// Record that `user` dismissed or accepted `message_id`.
    ///
    /// Fails with [`JitmError::MessageNotFound`] when the id is not in the
    /// loaded catalog; the store is not touched in that case.
    pub async fn report_action(
        &self,
        user: &UserId,
        message_id: &str,
        action: UserAction,
    ) -> Result<(), JitmError> {
        if !self.catalog.load().contains(message_id) {
            debug!(message_id, "action reported for unknown message");
            return Err(JitmError::MessageNotFound {
                id: message_id.to_string(),
            });
        }

        self.store
            .record(user, &MessageId::from(message_id), action)
            .await?;
        info!(user = %user, message_id, action = %action, "message action recorded");
        Ok(())
    }
}
