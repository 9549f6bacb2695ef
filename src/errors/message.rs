// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by message operations.
//!
//! Plain resolution never produces one of these; it folds serialization
//! failures into its output text instead. Everything else that can fail
//! (pretty rendering, priority assignment, annotation) returns a
//! `MessageError` for the caller to handle.

use crate::level::Priority;
use thiserror::Error;

/// Error type for message construction, rendering and mutation.
#[derive(Error, Debug)]
pub enum MessageError {
    /// The payload could not be serialized.
    #[error("problem marshaling message: {0}")]
    Marshal(#[from] serde_json::Error),

    /// The priority is not one of the defined severity levels.
    #[error("{0} is not a valid priority")]
    InvalidPriority(Priority),

    /// A priority name did not match any defined level.
    #[error("unknown priority name '{0}'")]
    UnknownPriority(String),

    /// The annotation key is already present on the message.
    #[error("annotation key '{0}' already exists")]
    DuplicateAnnotation(String),
}
