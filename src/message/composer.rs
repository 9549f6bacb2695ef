// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::MessageError;
use crate::level::Priority;
use crate::message::JsonMessage;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Object-safe message interface consumed by sinks.
///
/// Sinks hold messages as `Box<dyn Composer>` regardless of payload type,
/// compare [`priority`](Composer::priority) against their threshold and only
/// then call [`resolve`](Composer::resolve).
///
/// # Example
/// ```
/// use loglet::{Composer, JsonMessage, Priority};
///
/// let mut batch: Vec<Box<dyn Composer>> = vec![
///     Box::new(JsonMessage::new("starting")),
///     Box::new(JsonMessage::new(42)),
/// ];
/// for msg in batch.iter_mut() {
///     msg.set_priority(Priority::NOTICE).unwrap();
/// }
///
/// let lines: Vec<String> = batch
///     .iter()
///     .filter(|m| m.loggable() && m.priority() >= Priority::INFO)
///     .map(|m| m.resolve())
///     .collect();
/// assert_eq!(lines, vec!["\"starting\"", "42"]);
/// ```
pub trait Composer {
    /// Plain resolution; never fails.
    fn resolve(&self) -> String;

    /// Pretty resolution; newline terminated on success.
    fn marshal_pretty(&self) -> Result<Vec<u8>, MessageError>;

    fn loggable(&self) -> bool;

    /// The payload as a JSON value, `None` when absent or unserializable.
    fn raw_json(&self) -> Option<Value>;

    fn priority(&self) -> Priority;

    fn set_priority(&mut self, priority: Priority) -> Result<(), MessageError>;

    fn annotate(&mut self, key: String, value: Value) -> Result<(), MessageError>;

    fn context(&self) -> &BTreeMap<String, Value>;
}

impl<T: Serialize> Composer for JsonMessage<T> {
    fn resolve(&self) -> String {
        JsonMessage::resolve(self).to_string()
    }

    fn marshal_pretty(&self) -> Result<Vec<u8>, MessageError> {
        JsonMessage::marshal_pretty(self)
    }

    fn loggable(&self) -> bool {
        JsonMessage::loggable(self)
    }

    fn raw_json(&self) -> Option<Value> {
        JsonMessage::raw_json(self)
    }

    fn priority(&self) -> Priority {
        JsonMessage::priority(self)
    }

    fn set_priority(&mut self, priority: Priority) -> Result<(), MessageError> {
        JsonMessage::set_priority(self, priority)
    }

    fn annotate(&mut self, key: String, value: Value) -> Result<(), MessageError> {
        JsonMessage::annotate(self, key, value)
    }

    fn context(&self) -> &BTreeMap<String, Value> {
        JsonMessage::context(self)
    }
}
