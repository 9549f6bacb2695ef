// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for loading message configuration files.

use crate::level::Priority;
use thiserror::Error;

/// Errors that can occur while loading a `MessageConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for the config schema.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file is not valid TOML for the config schema.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is neither YAML nor TOML.
    #[error("unsupported config format '{0}', expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),

    /// The configured default priority is the unset sentinel.
    #[error("default priority must be a defined level, got {0}")]
    InvalidDefaultPriority(Priority),
}
