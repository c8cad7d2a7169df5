// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dismissal record operations.

use std::str::FromStr;

use jitm_core::{DismissalSnapshot, DismissalState, JitmError, MessageId, UserAction, UserId};
use rusqlite::params;

use crate::database::Database;

/// Insert or overwrite the record for (user, message). The latest action wins.
pub async fn upsert(
    db: &Database,
    user: &UserId,
    message: &MessageId,
    action: UserAction,
) -> Result<(), JitmError> {
    let user = user.0.clone();
    let message = message.0.clone();
    let state = DismissalState::from(action).to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO dismissals (user_id, message_id, state)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (user_id, message_id) DO UPDATE SET
                     state = excluded.state,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![user, message, state],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// State of one (user, message) pair; `Unseen` when no row exists.
pub async fn get_state(
    db: &Database,
    user: &UserId,
    message: &MessageId,
) -> Result<DismissalState, JitmError> {
    let user = user.0.clone();
    let message = message.0.clone();
    let raw = db
        .connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT state FROM dismissals WHERE user_id = ?1 AND message_id = ?2",
                params![user, message],
                |row| row.get(0),
            );
            match result {
                Ok(state) => Ok(Some(state)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match raw {
        Some(raw) => parse_state(&raw),
        None => Ok(DismissalState::Unseen),
    }
}

/// Every record stored for `user`.
pub async fn list_for_user(db: &Database, user: &UserId) -> Result<DismissalSnapshot, JitmError> {
    let user = user.0.clone();
    let rows = db
        .connection()
        .call(move |conn| -> Result<Vec<(String, String)>, rusqlite::Error> {
            let mut stmt =
                conn.prepare("SELECT message_id, state FROM dismissals WHERE user_id = ?1")?;
            let rows = stmt.query_map(params![user], |row| Ok((row.get(0)?, row.get(1)?)))?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    let mut snapshot = DismissalSnapshot::new();
    for (message, raw) in rows {
        snapshot.insert(MessageId(message), parse_state(&raw)?);
    }
    Ok(snapshot)
}

fn parse_state(raw: &str) -> Result<DismissalState, JitmError> {
    DismissalState::from_str(raw).map_err(|_| JitmError::Storage {
        source: format!("unrecognized dismissal state '{raw}'").into(),
    })
}
