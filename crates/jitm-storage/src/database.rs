// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use jitm_core::JitmError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations::run_migrations;

/// Handle to an open, migrated SQLite database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`, apply PRAGMAs, and run migrations.
    ///
    /// Missing parent directories are created.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, JitmError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| JitmError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| JitmError::Storage {
                source: e.to_string().into(),
            })?;

        let journal_mode = if wal_mode { "WAL" } else { "DELETE" };
        conn.call(move |conn| -> Result<(), JitmError> {
            let pragmas = format!(
                "PRAGMA journal_mode = {journal_mode};
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA foreign_keys = ON;"
            );
            conn.execute_batch(&pragmas).map_err(|e| JitmError::Storage {
                source: Box::new(e),
            })?;
            run_migrations(conn)
        })
        .await
        .map_err(flatten_tr_err)?;

        debug!(path, journal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The async connection all queries run through.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), JitmError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(|e| JitmError::Storage {
            source: e.to_string().into(),
        })?;
        debug!("database closed");
        Ok(())
    }
}

/// Map a tokio-rusqlite error wrapping a rusqlite error to a storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> JitmError {
    match e {
        tokio_rusqlite::Error::Error(e) => JitmError::Storage {
            source: Box::new(e),
        },
        other => JitmError::Storage {
            source: other.to_string().into(),
        },
    }
}

/// Unwrap a tokio-rusqlite error whose closure already produced a [`JitmError`].
fn flatten_tr_err(e: tokio_rusqlite::Error<JitmError>) -> JitmError {
    match e {
        tokio_rusqlite::Error::Error(e) => e,
        other => JitmError::Storage {
            source: other.to_string().into(),
        },
    }
}
