// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for JITM integration tests.
//!
//! Provides a harness that wires a [`JitmService`](jitm_engine::JitmService)
//! over a temp SQLite store, plus mock stores for failure paths.
//!
//! # Components
//!
//! - [`TestHarness`] - service, store, and config backed by a temp directory
//! - [`FailingDismissalStore`] - store whose every call fails

pub mod harness;
pub mod mock_store;

pub use harness::{TestHarness, TestHarnessBuilder, message};
pub use mock_store::FailingDismissalStore;
