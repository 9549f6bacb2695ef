// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_LOG_FILTER, DEFAULT_PRIORITY};
use crate::errors::{ConfigError, MessageError};
use crate::level::Priority;
use crate::message::{Composer, JsonMessage};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Defaults applied by producers that build messages from configuration.
///
/// Every field is optional in the file and falls back to a built-in default.
///
/// # Fields
/// * `default_priority` - Priority given to newly composed messages (defaults to `info`)
/// * `render` - How [`MessageConfig::render`] turns a message into text (defaults to `plain`)
/// * `log_filter` - `tracing` filter for the crate's own diagnostics (defaults to `warn`)
///
/// # Example
/// ```yaml
/// default_priority: notice
/// render: pretty
/// log_filter: loglet=debug
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MessageConfig {
    #[serde(default = "default_priority")]
    pub default_priority: Priority,
    #[serde(default)]
    pub render: RenderStyle,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_priority() -> Priority {
    DEFAULT_PRIORITY
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
            render: RenderStyle::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// Text form produced by [`MessageConfig::render`].
///
/// # Variants
/// * `Plain` - Compact JSON, diagnostic text on failure
/// * `Pretty` - Indented, newline-terminated JSON
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    #[default]
    Plain,
    Pretty,
}

impl MessageConfig {
    /// Check values the schema alone cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_priority.is_valid() {
            return Err(ConfigError::InvalidDefaultPriority(self.default_priority));
        }
        Ok(())
    }

    /// Build a message carrying the configured default priority.
    ///
    /// # Example
    /// ```
    /// use loglet::config::MessageConfig;
    /// use loglet::Priority;
    ///
    /// let msg = MessageConfig::default().compose("ready").unwrap();
    /// assert_eq!(msg.priority(), Priority::INFO);
    /// ```
    pub fn compose<T>(&self, payload: T) -> Result<JsonMessage<T>, MessageError> {
        JsonMessage::with_priority(payload, self.default_priority)
    }

    /// Render a message in the configured style.
    ///
    /// Pretty rendering falls back to plain resolution when the payload cannot
    /// be serialized, so this never fails.
    pub fn render(&self, msg: &dyn Composer) -> String {
        match self.render {
            RenderStyle::Plain => msg.resolve(),
            RenderStyle::Pretty => match msg.marshal_pretty() {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(_) => msg.resolve(),
            },
        }
    }
}

/// Load a config from a YAML or TOML file, chosen by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MessageConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let content = fs::read_to_string(path)?;
    let cfg: MessageConfig = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        "toml" => toml::from_str(&content)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    };
    Ok(cfg)
}

/// Load a config and validate it
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<MessageConfig, ConfigError> {
    let cfg = load_config(path)?;
    cfg.validate()?;
    Ok(cfg)
}
