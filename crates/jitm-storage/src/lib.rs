// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dismissal persistence for the JITM message engine.
//!
//! Provides a WAL-mode SQLite store with embedded migrations, serialized
//! through `tokio-rusqlite`, and an in-memory store for embedding and tests.

pub mod adapter;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteDismissalStore;
pub use database::Database;
pub use memory::MemoryDismissalStore;
