// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `jitm check` command implementation.
//!
//! Configuration and catalog errors never reach this point (they are rendered
//! and exit before dispatch), so a run here reports the loaded state and the
//! dismissal store's health.

use std::io::Write;

use jitm_config::JitmConfig;
use jitm_core::{DismissalStore, HealthStatus, JitmError};
use jitm_engine::Catalog;

use crate::write_out;

pub async fn run_check(
    config: &JitmConfig,
    catalog: &Catalog,
    store: &dyn DismissalStore,
    out: &mut impl Write,
) -> Result<(), JitmError> {
    write_out(out, &format!("config: ok (log_level={})", config.engine.log_level))?;
    write_out(out, &format!("catalog: ok ({} messages)", catalog.len()))?;

    match store.health_check().await? {
        HealthStatus::Healthy => write_out(out, &format!("store: ok ({})", store.name())),
        HealthStatus::Degraded(reason) => {
            write_out(out, &format!("store: degraded ({}): {reason}", store.name()))
        }
        HealthStatus::Unhealthy(reason) => Err(JitmError::Storage {
            source: format!("{} store unhealthy: {reason}", store.name()).into(),
        }),
    }
}
