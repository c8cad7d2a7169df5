// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the JITM configuration system.

use std::io::Write;

use jitm_config::diagnostic::{ConfigError, suggest_key};
use jitm_config::model::JitmConfig;
use jitm_config::{
    collect_message_entries, load_and_validate_path, load_and_validate_str, load_config_from_str,
};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_jitm_config() {
    let toml = r#"
[engine]
log_level = "debug"
default_variation = "control"

[storage]
database_path = "/tmp/jitm-test.db"
wal_mode = false

[catalog]
include_builtin = false
admin_url = "https://example.com/wp-admin/"

[[messages]]
id = "a"
path = "wp:upload:admin_notices"
headline = "Images"
description = "Faster images"
cta_link = "https://example.com/setup"
cta_label = "Set up"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.engine.log_level, "debug");
    assert_eq!(config.engine.default_variation, "control");
    assert_eq!(config.storage.database_path, "/tmp/jitm-test.db");
    assert!(!config.storage.wal_mode);
    assert!(!config.catalog.include_builtin);
    assert_eq!(config.catalog.admin_url, "https://example.com/wp-admin/");
    assert_eq!(config.messages.len(), 1);
    assert_eq!(config.messages[0].id.as_deref(), Some("a"));
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.engine.log_level, "info");
    assert_eq!(config.engine.default_variation, "original");
    assert!(config.storage.database_path.ends_with("jitm.db"));
    assert!(config.storage.wal_mode);
    assert!(config.catalog.path.is_none());
    assert!(config.catalog.include_builtin);
    assert_eq!(config.catalog.admin_url, "/wp-admin/");
    assert!(config.messages.is_empty());
}

/// Unknown field in [engine] produces an error naming the bad key.
#[test]
fn unknown_field_in_engine_produces_error() {
    let toml = r#"
[engine]
log_levl = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("log_levl"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telemetry]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telemetry"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Dot-notation overrides (what the env provider produces) win over TOML.
#[test]
fn env_style_override_wins_over_toml() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[storage]
database_path = "from-toml.db"
"#;

    let config: JitmConfig = Figment::new()
        .merge(Serialized::defaults(JitmConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("storage.database_path", "from-env.db"))
        .extract()
        .expect("should merge env override");

    assert_eq!(config.storage.database_path, "from-env.db");
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: JitmConfig = Figment::new()
        .merge(Serialized::defaults(JitmConfig::default()))
        .merge(Toml::file("/nonexistent/path/jitm.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.engine.default_variation, "original");
}

/// An explicitly named config file must exist.
#[test]
fn explicit_missing_config_path_is_an_error() {
    let errors = load_and_validate_path(std::path::Path::new("/nonexistent/jitm.toml"))
        .expect_err("missing explicit path should fail");
    assert!(matches!(&errors[0], ConfigError::Other(m) if m.contains("does not exist")));
}

/// Explicit config file is loaded and validated.
#[test]
fn explicit_config_path_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine]\nlog_level = \"warn\"").unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.engine.log_level, "warn");
}

#[test]
fn diagnostic_headlin_suggests_headline() {
    let valid_keys = &["id", "path", "headline", "description"];
    assert_eq!(suggest_key("headlin", valid_keys), Some("headline".to_string()));
}

/// Error output from load_and_validate_str includes the unknown key and a suggestion.
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[storage]
databse_path = "x.db"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "databse_path"
                && suggestion.as_deref() == Some("database_path")
                && valid_keys.contains("wal_mode")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'databse_path', got: {errors:?}"
    );
}

/// Wrong value type is reported as InvalidType.
#[test]
fn diagnostic_invalid_type() {
    let toml = r#"
[storage]
wal_mode = "yes"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("wal_mode"))),
        "expected InvalidType for wal_mode, got: {errors:?}"
    );
}

/// Semantic validation runs after successful deserialization.
#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[engine]
log_level = "loud"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("log_level")));
}

/// External catalog entries are appended after the inline ones.
#[test]
fn catalog_file_entries_follow_inline_entries() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[messages]]
id = "from-file"
path = "wp:widgets:admin_notices"
"#
    )
    .unwrap();

    let toml = format!(
        r#"
[catalog]
path = "{}"

[[messages]]
id = "inline"
path = "wp:upload:admin_notices"
"#,
        file.path().display()
    );

    let config = load_and_validate_str(&toml).expect("config should load");
    let entries = collect_message_entries(&config).expect("catalog file should load");
    let ids: Vec<_> = entries.iter().map(|e| e.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["inline", "from-file"]);
}

/// A catalog file that cannot be read is an error, never an empty catalog.
#[test]
fn unreadable_catalog_file_is_an_error() {
    let mut config = JitmConfig::default();
    config.catalog.path = Some("/nonexistent/catalog.toml".to_string());
    let errors = collect_message_entries(&config).expect_err("should fail");
    assert!(matches!(&errors[0], ConfigError::Other(m) if m.contains("cannot read catalog file")));
}

/// Unknown keys inside a catalog file are rejected.
#[test]
fn catalog_file_rejects_unknown_keys() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[[messages]]\nid = \"a\"\nheadlin = \"typo\"").unwrap();

    let mut config = JitmConfig::default();
    config.catalog.path = Some(file.path().display().to_string());
    let errors = collect_message_entries(&config).expect_err("should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "headlin")),
        "got: {errors:?}"
    );
}
