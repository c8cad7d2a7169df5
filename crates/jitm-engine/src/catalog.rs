// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ordered, immutable message catalog and its loader.
//!
//! Catalog order is the only priority signal: when several messages match
//! and are eligible, the one defined first wins. Reordering entries changes
//! which message is shown.

use std::collections::HashMap;

use jitm_config::{ConfigError, JitmConfig, MessageConfig};
use jitm_core::MessageId;
use tracing::info;

use crate::builtin::builtin_entries;
use crate::message::MessageDefinition;
use crate::pattern::PathPattern;

/// Ordered collection of validated message definitions with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: Vec<MessageDefinition>,
    index: HashMap<MessageId, usize>,
}

impl Catalog {
    /// An empty catalog. Selection against it always yields no message.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-validated definitions.
    ///
    /// Rejects duplicate ids; on error no catalog is produced.
    pub fn from_definitions(messages: Vec<MessageDefinition>) -> Result<Self, Vec<ConfigError>> {
        let mut index = HashMap::with_capacity(messages.len());
        let mut errors = Vec::new();
        for (i, message) in messages.iter().enumerate() {
            if let Some(&first_index) = index.get(&message.id) {
                errors.push(ConfigError::DuplicateMessageId {
                    id: message.id.0.clone(),
                    first_index,
                    index: i,
                });
            } else {
                index.insert(message.id.clone(), i);
            }
        }
        if errors.is_empty() {
            Ok(Self { messages, index })
        } else {
            Err(errors)
        }
    }

    pub fn get(&self, id: &str) -> Option<&MessageDefinition> {
        self.index
            .get(&MessageId::from(id))
            .map(|&i| &self.messages[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(&MessageId::from(id))
    }

    /// Definitions in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &MessageDefinition> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MessageDefinition;
    type IntoIter = std::slice::Iter<'a, MessageDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Validate raw entries and build a catalog in the given order.
///
/// Every entry is checked and every problem is reported (missing required
/// field, malformed path pattern, duplicate id, blank plan or variation), each
/// naming the offending entry. If any entry is invalid the whole catalog is
/// refused; nothing is partially registered.
pub fn load_catalog(entries: &[MessageConfig]) -> Result<Catalog, Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut definitions = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        match build_definition(index, entry) {
            Ok(definition) => definitions.push(definition),
            Err(mut entry_errors) => errors.append(&mut entry_errors),
        }
    }

    // Duplicate detection runs over the raw ids so that an invalid entry
    // still participates in the check.
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(id) = entry.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
            continue;
        };
        if let Some(&first_index) = first_seen.get(id) {
            errors.push(ConfigError::DuplicateMessageId {
                id: id.to_string(),
                first_index,
                index,
            });
        } else {
            first_seen.insert(id, index);
        }
    }

    if !errors.is_empty() {
        errors.sort_by_key(|e| e.entry_index());
        return Err(errors);
    }

    let catalog = Catalog::from_definitions(definitions)?;
    info!(count = catalog.len(), "message catalog loaded");
    Ok(catalog)
}

/// Assemble the catalog described by a configuration: built-in notices
/// (unless disabled), then inline `[[messages]]`, then the external catalog file.
pub fn load_catalog_from_config(config: &JitmConfig) -> Result<Catalog, Vec<ConfigError>> {
    let mut entries = if config.catalog.include_builtin {
        builtin_entries(&config.catalog.admin_url)
    } else {
        Vec::new()
    };
    entries.extend(jitm_config::collect_message_entries(config)?);
    load_catalog(&entries)
}

fn build_definition(
    index: usize,
    entry: &MessageConfig,
) -> Result<MessageDefinition, Vec<ConfigError>> {
    let mut errors = Vec::new();
    let id = non_blank(&entry.id);

    let mut required = |field: &'static str, value: &Option<String>| -> Option<String> {
        let value = non_blank(value).map(str::to_string);
        if value.is_none() {
            errors.push(ConfigError::MissingMessageField {
                index,
                id: id.map(str::to_string),
                field,
            });
        }
        value
    };

    let id_value = required("id", &entry.id);
    let path = required("path", &entry.path);
    let headline = required("headline", &entry.headline);
    let description = required("description", &entry.description);
    let cta_link = required("cta_link", &entry.cta_link);
    let cta_label = required("cta_label", &entry.cta_label);

    let pattern = path.and_then(|raw| match PathPattern::parse(&raw) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            errors.push(ConfigError::InvalidPathPattern {
                index,
                id: id.unwrap_or("<unnamed>").to_string(),
                pattern: raw,
                reason: e.to_string(),
            });
            None
        }
    });

    let label = id.unwrap_or("<unnamed>");
    if entry.plans.iter().any(|p| p.trim().is_empty()) {
        errors.push(ConfigError::Validation {
            message: format!("message `{label}` (messages[{index}]) lists an empty plan slug"),
        });
    }
    let variation = match entry.variation.as_deref().map(str::trim) {
        Some("") => {
            errors.push(ConfigError::Validation {
                message: format!("message `{label}` (messages[{index}]) has an empty variation"),
            });
            None
        }
        other => other.map(str::to_string),
    };

    match (id_value, pattern, headline, description, cta_link, cta_label) {
        (Some(id), Some(pattern), Some(headline), Some(description), Some(cta_link), Some(cta_label))
            if errors.is_empty() =>
        {
            Ok(MessageDefinition {
                id: MessageId(id),
                pattern,
                headline,
                description,
                cta_link,
                cta_label,
                min_required_count: entry.min_required_count,
                plans: entry.plans.iter().map(|p| p.trim().to_string()).collect(),
                variation,
            })
        }
        _ => Err(errors),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
