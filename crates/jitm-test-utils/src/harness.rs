// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a [`JitmService`] over a temp SQLite dismissal
//! store and a catalog built from the same loader the binary uses.

use std::sync::Arc;

use jitm_config::model::{CatalogConfig, JitmConfig, MessageConfig, StorageConfig};
use jitm_core::{DismissalStore, JitmError, UserAction, UserId};
use jitm_engine::{Context, JitmService, SelectedMessage, load_catalog_from_config};
use jitm_storage::SqliteDismissalStore;

/// Build a complete catalog entry with placeholder copy.
pub fn message(id: &str, path: &str) -> MessageConfig {
    MessageConfig {
        id: Some(id.to_string()),
        path: Some(path.to_string()),
        headline: Some(format!("{id} headline")),
        description: Some(format!("{id} description")),
        cta_link: Some(format!("/wp-admin/admin.php?page={id}")),
        cta_label: Some("Go".to_string()),
        ..MessageConfig::default()
    }
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    messages: Vec<MessageConfig>,
    include_builtin: bool,
    admin_url: Option<String>,
    default_variation: Option<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            include_builtin: true,
            admin_url: None,
            default_variation: None,
        }
    }

    /// Append catalog entries after the built-in ones.
    pub fn with_messages(mut self, messages: Vec<MessageConfig>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Leave the built-in setup notices out of the catalog.
    pub fn without_builtin(mut self) -> Self {
        self.include_builtin = false;
        self
    }

    pub fn with_admin_url(mut self, admin_url: impl Into<String>) -> Self {
        self.admin_url = Some(admin_url.into());
        self
    }

    pub fn with_default_variation(mut self, variation: impl Into<String>) -> Self {
        self.default_variation = Some(variation.into());
        self
    }

    /// Build the test harness, creating the temp database and catalog.
    pub async fn build(self) -> Result<TestHarness, JitmError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| JitmError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = JitmConfig {
            storage: StorageConfig {
                database_path: db_path.to_string_lossy().to_string(),
                wal_mode: true,
            },
            catalog: CatalogConfig {
                include_builtin: self.include_builtin,
                ..CatalogConfig::default()
            },
            messages: self.messages,
            ..JitmConfig::default()
        };
        if let Some(admin_url) = self.admin_url {
            config.catalog.admin_url = admin_url;
        }
        if let Some(variation) = self.default_variation {
            config.engine.default_variation = variation;
        }

        let catalog = load_catalog_from_config(&config).map_err(|errors| {
            JitmError::Config(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        let store = Arc::new(SqliteDismissalStore::open(config.storage.clone()).await?);
        let service = JitmService::from_config(&config, catalog, store.clone());

        Ok(TestHarness {
            service,
            store,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment backed by a temp directory.
pub struct TestHarness {
    /// The service under test.
    pub service: JitmService,
    /// The SQLite store the service records into.
    pub store: Arc<SqliteDismissalStore>,
    /// Configuration the harness was built from.
    pub config: JitmConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Select for `user` and return only the chosen id.
    pub async fn selected_id(&self, user: &str, context: &Context) -> Result<Option<String>, JitmError> {
        Ok(self
            .select(user, context)
            .await?
            .map(|selected| selected.id))
    }

    pub async fn select(
        &self,
        user: &str,
        context: &Context,
    ) -> Result<Option<SelectedMessage>, JitmError> {
        self.service.select(&UserId::from(user), context).await
    }

    pub async fn dismiss(&self, user: &str, message_id: &str) -> Result<(), JitmError> {
        self.service
            .report_action(&UserId::from(user), message_id, UserAction::Dismissed)
            .await
    }

    pub async fn accept(&self, user: &str, message_id: &str) -> Result<(), JitmError> {
        self.service
            .report_action(&UserId::from(user), message_id, UserAction::Accepted)
            .await
    }

    /// Store name, for asserting which backend is wired in.
    pub fn store_name(&self) -> &str {
        self.store.name()
    }
}
