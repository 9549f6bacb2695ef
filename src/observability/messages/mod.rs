// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized diagnostic event types.
//!
//! Each event implements `Display` for its human-readable wording and
//! [`StructuredLog`] to emit itself with structured fields at a fixed level.
//!
//! # Usage Pattern
//!
//! ```rust
//! use loglet::observability::messages::message::AnnotationRejected;
//!
//! let msg = AnnotationRejected { key: "request_id" };
//!
//! tracing::debug!("{}", msg);
//! ```

pub mod message;

use tracing::Span;

/// An event that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the event at its designated level.
    fn log(&self);

    /// Open a span carrying the event's fields.
    fn span(&self, name: &str) -> Span;
}
