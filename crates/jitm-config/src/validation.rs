// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.
//! Catalog entries are validated separately when the catalog is assembled,
//! since that requires parsing their path patterns.

use crate::diagnostic::ConfigError;
use crate::model::JitmConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &JitmConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.engine.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.log_level `{}` must be one of: {}",
                config.engine.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.engine.default_variation.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "engine.default_variation must not be empty".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let admin_url = config.catalog.admin_url.trim();
    if admin_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "catalog.admin_url must not be empty".to_string(),
        });
    } else if !admin_url.ends_with('/') {
        errors.push(ConfigError::Validation {
            message: format!("catalog.admin_url `{admin_url}` must end with `/`"),
        });
    }

    if let Some(path) = &config.catalog.path {
        if path.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "catalog.path must not be empty when set".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
