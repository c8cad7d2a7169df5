// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the DismissalStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use jitm_config::model::StorageConfig;
use jitm_core::{
    DismissalSnapshot, DismissalState, DismissalStore, HealthStatus, JitmError, MessageId,
    UserAction, UserId,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed dismissal store.
///
/// Wraps a [`Database`] handle and delegates to the typed query module. The
/// database is lazily opened by [`SqliteDismissalStore::initialize`].
pub struct SqliteDismissalStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteDismissalStore {
    /// Create a new store for the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create and initialize a store in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, JitmError> {
        let store = Self::new(config);
        store.initialize().await?;
        Ok(store)
    }

    /// Open the database and run migrations.
    pub async fn initialize(&self) -> Result<(), JitmError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| JitmError::Storage {
            source: "dismissal store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite dismissal store initialized");
        Ok(())
    }

    /// Checkpoint the WAL so the database file is self-contained.
    pub async fn close(&self) -> Result<(), JitmError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    fn db(&self) -> Result<&Database, JitmError> {
        self.db.get().ok_or_else(|| JitmError::Storage {
            source: "dismissal store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl DismissalStore for SqliteDismissalStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, JitmError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn get(&self, user: &UserId, message: &MessageId) -> Result<DismissalState, JitmError> {
        queries::dismissals::get_state(self.db()?, user, message).await
    }

    async fn record(
        &self,
        user: &UserId,
        message: &MessageId,
        action: UserAction,
    ) -> Result<(), JitmError> {
        queries::dismissals::upsert(self.db()?, user, message, action).await
    }

    async fn snapshot(&self, user: &UserId) -> Result<DismissalSnapshot, JitmError> {
        queries::dismissals::list_for_user(self.db()?, user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let store = SqliteDismissalStore::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(store.name(), "sqlite");
        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteDismissalStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let store = SqliteDismissalStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.health_check().await.is_err());
        let err = store.snapshot(&"1".into()).await.unwrap_err();
        assert!(matches!(err, JitmError::Storage { .. }));
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let store = SqliteDismissalStore::open(make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("durable.db");
        let config = make_config(db_path.to_str().unwrap());
        let user = UserId::from("42");

        {
            let store = SqliteDismissalStore::open(config.clone()).await.unwrap();
            store
                .record(&user, &"jpsetup-upload".into(), UserAction::Dismissed)
                .await
                .unwrap();
            store.close().await.unwrap();
        }

        let store = SqliteDismissalStore::open(config).await.unwrap();
        assert_eq!(
            store.get(&user, &"jpsetup-upload".into()).await.unwrap(),
            DismissalState::Dismissed
        );
        assert_eq!(
            store.get(&user, &"jpsetup-widgets".into()).await.unwrap(),
            DismissalState::Unseen
        );
    }
}
