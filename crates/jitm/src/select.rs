// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `jitm select` command implementation.

use std::io::Write;

use clap::Args;
use jitm_core::{JitmError, UserId};
use jitm_engine::{Context, JitmService};

use crate::write_out;

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Admin area segment, e.g. `wp`.
    pub area: String,
    /// Screen segment, e.g. `upload`.
    pub screen: String,
    /// Trigger event, e.g. `admin_notices`. Omit for a two-segment context.
    pub event: Option<String>,
    /// User the selection is made for.
    #[arg(long)]
    pub user: String,
    /// Number of published posts on the site.
    #[arg(long, default_value_t = 0)]
    pub published: u64,
    /// Active plan slug.
    #[arg(long)]
    pub plan: Option<String>,
    /// Force an experiment variation for this request.
    #[arg(long)]
    pub variation: Option<String>,
    /// Variation assigned by an external experiment service.
    #[arg(long)]
    pub assigned_variation: Option<String>,
}

impl SelectArgs {
    pub fn context(&self) -> Context {
        let mut context =
            Context::new(&self.area, &self.screen).with_published_count(self.published);
        if let Some(event) = &self.event {
            context = context.with_event(event);
        }
        if let Some(plan) = &self.plan {
            context = context.with_plan(plan);
        }
        if let Some(variation) = &self.variation {
            context = context.with_variation_override(variation);
        }
        if let Some(variation) = &self.assigned_variation {
            context = context.with_assigned_variation(variation);
        }
        context
    }
}

/// Run the selection and print the result as JSON.
pub async fn run_select(
    service: &JitmService,
    args: &SelectArgs,
    out: &mut impl Write,
) -> Result<(), JitmError> {
    let selected = service
        .select(&UserId(args.user.clone()), &args.context())
        .await?;
    let json = serde_json::to_string_pretty(&selected)
        .map_err(|e| JitmError::Internal(format!("cannot encode selection: {e}")))?;
    write_out(out, &json)
}
