// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Log messages.
//!
//! A message wraps a structured payload and a priority. Producers build one per
//! log event and hand it to a sink; rendering to text is deferred until the
//! sink asks for it.
//!
//! * [`JsonMessage`] - the concrete message, rendering its payload as JSON
//! * [`Composer`] - the object-safe view a sink works with
//!
//! # Usage
//!
//! ```rust
//! use loglet::{JsonMessage, Priority};
//! use std::collections::BTreeMap;
//!
//! let mut msg = JsonMessage::new(BTreeMap::from([("a", 1)]));
//! msg.set_priority(Priority::INFO).unwrap();
//!
//! assert!(msg.loggable());
//! assert_eq!(msg.to_string(), r#"{"a":1}"#);
//! ```

mod composer;
mod json;

#[cfg(test)]
mod tests;

pub use composer::Composer;
pub use json::{JsonMessage, MARSHAL_PROBLEM};
