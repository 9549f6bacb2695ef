// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Diagnostic events raised by message resolution and mutation.
//!
//! This module contains event types for:
//! * Serialization failures swallowed by plain resolution
//! * Priority assignments rejected by validation
//! * Annotation keys rejected as duplicates

use crate::level::Priority;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Plain resolution could not serialize the payload and fell back to the
/// diagnostic text.
///
/// # Log Level
/// `debug!` - The failure is contained; the caller still gets text
///
/// # Example
/// ```
/// use loglet::observability::messages::message::MarshalFailed;
///
/// let error = serde_json::from_str::<u8>("x").unwrap_err();
/// let msg = MarshalFailed {
///     priority: loglet::Priority::ERROR,
///     error: &error,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct MarshalFailed<'a> {
    pub priority: Priority,
    pub error: &'a dyn std::error::Error,
}

impl Display for MarshalFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to marshal {} message payload: {}",
            self.priority, self.error
        )
    }
}

impl StructuredLog for MarshalFailed<'_> {
    fn log(&self) {
        tracing::debug!(
            priority = %self.priority,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "marshal_failed",
            span_name = name,
            priority = %self.priority,
            error = %self.error,
        )
    }
}

/// A priority assignment was rejected and the previous value kept.
///
/// # Log Level
/// `warn!` - Caller passed a level outside the defined set
///
/// # Example
/// ```
/// use loglet::observability::messages::message::PriorityRejected;
/// use loglet::Priority;
///
/// let msg = PriorityRejected {
///     requested: Priority::from(10_000),
///     current: Priority::INVALID,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Rejected priority priority(10000), keeping invalid"
/// );
/// ```
pub struct PriorityRejected {
    pub requested: Priority,
    pub current: Priority,
}

impl Display for PriorityRejected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rejected priority {}, keeping {}",
            self.requested, self.current
        )
    }
}

impl StructuredLog for PriorityRejected {
    fn log(&self) {
        tracing::warn!(
            requested = self.requested.as_u16(),
            current = %self.current,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "priority_rejected",
            span_name = name,
            requested = self.requested.as_u16(),
            current = %self.current,
        )
    }
}

/// An annotation was rejected because its key was already present.
///
/// # Log Level
/// `debug!` - The error is returned to the caller as well
pub struct AnnotationRejected<'a> {
    pub key: &'a str,
}

impl Display for AnnotationRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Annotation key '{}' already set, ignoring new value", self.key)
    }
}

impl StructuredLog for AnnotationRejected<'_> {
    fn log(&self) {
        tracing::debug!(key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("annotation_rejected", span_name = name, key = self.key)
    }
}
