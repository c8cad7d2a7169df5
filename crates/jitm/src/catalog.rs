// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `jitm catalog` command implementation.

use std::io::Write;

use jitm_core::JitmError;
use jitm_engine::{Catalog, MessageDefinition};
use serde::Serialize;

use crate::write_out;

/// One catalog row as listed by the command.
#[derive(Debug, Serialize)]
struct CatalogRow<'a> {
    priority: usize,
    id: &'a str,
    path: &'a str,
    min_required_count: Option<u64>,
    plans: &'a [String],
    variation: Option<&'a str>,
}

impl<'a> CatalogRow<'a> {
    fn new(priority: usize, message: &'a MessageDefinition) -> Self {
        Self {
            priority,
            id: message.id.as_str(),
            path: message.pattern.as_str(),
            min_required_count: message.min_required_count,
            plans: &message.plans,
            variation: message.variation.as_deref(),
        }
    }
}

/// List the catalog in priority order, as a table or JSON.
pub fn run_catalog(catalog: &Catalog, json: bool, out: &mut impl Write) -> Result<(), JitmError> {
    let rows: Vec<_> = catalog
        .iter()
        .enumerate()
        .map(|(i, message)| CatalogRow::new(i + 1, message))
        .collect();

    if json {
        let text = serde_json::to_string_pretty(&rows)
            .map_err(|e| JitmError::Internal(format!("cannot encode catalog: {e}")))?;
        return write_out(out, &text);
    }

    if rows.is_empty() {
        return write_out(out, "catalog is empty");
    }

    for row in &rows {
        let mut line = format!("{:>3}  {:<24} {}", row.priority, row.id, row.path);
        if let Some(min) = row.min_required_count {
            line.push_str(&format!("  min={min}"));
        }
        if !row.plans.is_empty() {
            line.push_str(&format!("  plans={}", row.plans.join(",")));
        }
        if let Some(variation) = row.variation {
            line.push_str(&format!("  variation={variation}"));
        }
        write_out(out, &line)?;
    }
    Ok(())
}
