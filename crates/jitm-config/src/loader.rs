// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./jitm.toml` > `~/.config/jitm/jitm.toml` > `/etc/jitm/jitm.toml`
//! with environment variable overrides via `JITM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::{CatalogFile, JitmConfig};

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/jitm/jitm.toml` (system-wide)
/// 3. `~/.config/jitm/jitm.toml` (user XDG config)
/// 4. `./jitm.toml` (local directory)
/// 5. `JITM_*` environment variables
pub fn load_config() -> Result<JitmConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<JitmConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(JitmConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<JitmConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(JitmConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Parse the contents of an external catalog file.
pub fn load_catalog_file_from_str(toml_content: &str) -> Result<CatalogFile, figment::Error> {
    Figment::new()
        .merge(Toml::string(toml_content))
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(JitmConfig::default()))
        .merge(Toml::file("/etc/jitm/jitm.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("jitm/jitm.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("jitm.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that underscore-containing
/// key names survive: `JITM_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("JITM_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("engine_", "engine.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("catalog_", "catalog.", 1);
        mapped.into()
    })
}
