// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `jitm report` command implementation.

use std::io::Write;

use clap::{Args, ValueEnum};
use jitm_core::{JitmError, UserAction, UserId};
use jitm_engine::JitmService;

use crate::write_out;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// User who acted on the message.
    #[arg(long)]
    pub user: String,
    /// Catalog id of the message.
    pub message_id: String,
    /// What the user did.
    #[arg(value_enum)]
    pub action: ActionArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    Dismissed,
    Accepted,
}

impl From<ActionArg> for UserAction {
    fn from(action: ActionArg) -> Self {
        match action {
            ActionArg::Dismissed => UserAction::Dismissed,
            ActionArg::Accepted => UserAction::Accepted,
        }
    }
}

/// Record the action. An id missing from the catalog is reported and nothing is stored.
pub async fn run_report(
    service: &JitmService,
    args: &ReportArgs,
    out: &mut impl Write,
) -> Result<(), JitmError> {
    let action = UserAction::from(args.action);
    service
        .report_action(&UserId(args.user.clone()), &args.message_id, action)
        .await?;
    write_out(
        out,
        &format!("recorded {action} for {} (user {})", args.message_id, args.user),
    )
}
