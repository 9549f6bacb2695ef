// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::MessageError;
use crate::level::Priority;
use crate::observability::messages::message::{AnnotationRejected, MarshalFailed, PriorityRejected};
use crate::observability::messages::StructuredLog;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

/// Prefix of the text plain resolution returns when the payload cannot be
/// serialized.
pub const MARSHAL_PROBLEM: &str = "problem marshaling message.";

/// A log message carrying an arbitrary serializable payload.
///
/// The payload is stored as given and only serialized on resolution. There are
/// two ways to resolve:
///
/// * [`resolve`](JsonMessage::resolve) (also `Display`) - compact JSON. Never
///   fails: an unserializable payload resolves to a diagnostic string starting
///   with [`MARSHAL_PROBLEM`]. The result is computed once and cached.
/// * [`marshal_pretty`](JsonMessage::marshal_pretty) - indented JSON terminated
///   by a single newline, with serialization errors returned to the caller.
///
/// Priority starts as [`Priority::INVALID`] and only ever moves to a valid
/// level.
///
/// # Example
/// ```
/// use loglet::{JsonMessage, Priority};
///
/// let mut msg = JsonMessage::new(false);
/// assert!(msg.loggable());
/// assert_eq!(msg.priority(), Priority::INVALID);
///
/// msg.set_priority(Priority::WARNING).unwrap();
/// assert!(msg.set_priority(Priority::from(10_000)).is_err());
/// assert_eq!(msg.priority(), Priority::WARNING);
///
/// let absent = JsonMessage::<bool>::new(None);
/// assert!(!absent.loggable());
/// assert_eq!(absent.to_string(), "null");
/// ```
#[derive(Debug, Clone)]
pub struct JsonMessage<T> {
    raw: Option<T>,
    priority: Priority,
    context: BTreeMap<String, Value>,
    resolved: OnceLock<String>,
}

impl<T> JsonMessage<T> {
    /// Wrap a payload. Passing `None` produces a message that is not
    /// loggable.
    ///
    /// Bare values convert through `From<T> for Option<T>`. When the payload
    /// type is itself an `Option`, name the message type
    /// (`JsonMessage::<u8>::new(None)`) or use [`from_option`](Self::from_option)
    /// so the compiler does not have to guess which `Option` is meant.
    pub fn new(payload: impl Into<Option<T>>) -> Self {
        Self::from_option(payload.into())
    }

    /// Wrap a payload that may be absent.
    pub fn from_option(payload: Option<T>) -> Self {
        Self {
            raw: payload,
            priority: Priority::INVALID,
            context: BTreeMap::new(),
            resolved: OnceLock::new(),
        }
    }

    /// Wrap a payload and assign its priority in one step.
    pub fn with_priority(
        payload: impl Into<Option<T>>,
        priority: Priority,
    ) -> Result<Self, MessageError> {
        let mut msg = Self::new(payload);
        msg.set_priority(priority)?;
        Ok(msg)
    }

    /// The payload as constructed, or `None` if it was absent.
    pub fn raw(&self) -> Option<&T> {
        self.raw.as_ref()
    }

    /// Whether there is a payload at all. Falsy payloads such as `false`, `0`
    /// or an empty map are still loggable.
    pub fn loggable(&self) -> bool {
        self.raw.is_some()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Assign a new priority.
    ///
    /// Levels outside [`Priority::ALL`] are rejected and the current priority
    /// is kept.
    pub fn set_priority(&mut self, priority: Priority) -> Result<(), MessageError> {
        if !priority.is_valid() {
            PriorityRejected {
                requested: priority,
                current: self.priority,
            }
            .log();
            return Err(MessageError::InvalidPriority(priority));
        }

        self.priority = priority;
        Ok(())
    }

    /// Attach a context entry alongside the payload.
    ///
    /// Context never changes the payload or its resolution. A key can only be
    /// set once.
    pub fn annotate(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), MessageError> {
        let key = key.into();
        if self.context.contains_key(&key) {
            AnnotationRejected { key: &key }.log();
            return Err(MessageError::DuplicateAnnotation(key));
        }

        self.context.insert(key, value.into());
        Ok(())
    }

    pub fn context(&self) -> &BTreeMap<String, Value> {
        &self.context
    }
}

impl<T: Serialize> JsonMessage<T> {
    /// Compact JSON for the payload, or a diagnostic string if it cannot be
    /// serialized. An absent payload resolves to `null`.
    pub fn resolve(&self) -> &str {
        self.resolved.get_or_init(|| match serde_json::to_string(&self.raw) {
            Ok(text) => text,
            Err(err) => {
                MarshalFailed {
                    priority: self.priority,
                    error: &err,
                }
                .log();
                format!("{} {}", MARSHAL_PROBLEM, err)
            }
        })
    }

    /// Indented JSON for the payload, always ending in exactly one `\n`.
    pub fn marshal_pretty(&self) -> Result<Vec<u8>, MessageError> {
        let mut out = serde_json::to_vec_pretty(&self.raw)?;
        out.push(b'\n');
        Ok(out)
    }

    /// The payload converted to a JSON value, `None` when absent or
    /// unserializable.
    pub fn raw_json(&self) -> Option<Value> {
        self.raw
            .as_ref()
            .and_then(|raw| serde_json::to_value(raw).ok())
    }
}

impl<T: Serialize> Display for JsonMessage<T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.resolve())
    }
}
