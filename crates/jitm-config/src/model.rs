// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the JITM message engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level JITM configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JitmConfig {
    /// Engine behavior settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Dismissal store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog source settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Inline message definitions, in priority order.
    #[serde(default)]
    pub messages: Vec<MessageConfig>,
}

/// Engine behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Experiment branch used when a request carries neither an override nor
    /// an assigned variation.
    #[serde(default = "default_variation")]
    pub default_variation: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_variation: default_variation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_variation() -> String {
    "original".to_string()
}

/// Dismissal store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("jitm").join("jitm.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("jitm.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Catalog source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Optional external TOML file holding additional `[[messages]]` entries.
    /// Its entries are appended after the inline ones.
    #[serde(default)]
    pub path: Option<String>,

    /// Whether the built-in setup notices lead the catalog.
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Admin base URL used to build call-to-action links of built-in notices.
    #[serde(default = "default_admin_url")]
    pub admin_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_builtin: default_include_builtin(),
            admin_url: default_admin_url(),
        }
    }
}

fn default_include_builtin() -> bool {
    true
}

fn default_admin_url() -> String {
    "/wp-admin/".to_string()
}

/// A raw message definition as written in configuration.
///
/// Required fields are optional here so that a missing field can be reported
/// against the entry that lacks it when the catalog is built. Legacy key names
/// (`message_path`, `message`, `button_link`, `button_caption`) are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MessageConfig {
    /// Stable identifier, unique within the catalog.
    #[serde(default)]
    pub id: Option<String>,

    /// Path pattern, e.g. `wp:upload:admin_notices`.
    #[serde(default, alias = "message_path")]
    pub path: Option<String>,

    #[serde(default, alias = "message")]
    pub headline: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, alias = "button_link")]
    pub cta_link: Option<String>,

    #[serde(default, alias = "button_caption")]
    pub cta_label: Option<String>,

    /// Minimum published-post count required for the message to be eligible.
    #[serde(default)]
    pub min_required_count: Option<u64>,

    /// Plan slugs the message is restricted to. Empty means every plan.
    #[serde(default)]
    pub plans: Vec<String>,

    /// Experiment branch the message belongs to. `None` means every branch.
    #[serde(default)]
    pub variation: Option<String>,
}

/// Contents of an external catalog file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub messages: Vec<MessageConfig>,
}
