// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::MessageError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Log severity, ordered from least to most severe.
///
/// The inner value is the wire encoding. Any `u16` can be wrapped with
/// `Priority::from`, so callers can carry priorities received from outside
/// the process, but [`Priority::is_valid`] only accepts the defined levels.
///
/// # Example
/// ```
/// use loglet::Priority;
///
/// assert!(Priority::WARNING.is_valid());
/// assert!(Priority::ERROR > Priority::INFO);
/// assert!(!Priority::from(25).is_valid());
/// assert_eq!("warn".parse::<Priority>().unwrap(), Priority::WARNING);
/// ```
///
/// # Serialization
/// Valid levels serialize as their name, anything else as its numeric
/// encoding. Deserialization accepts a name or the encoding of a valid level,
/// so only valid levels round-trip; the unset sentinel and undefined
/// encodings serialize fine but are rejected when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "PriorityRepr")]
pub struct Priority(u16);

impl Priority {
    /// Sentinel for a message whose priority was never assigned.
    pub const INVALID: Priority = Priority(0);
    pub const TRACE: Priority = Priority(20);
    pub const DEBUG: Priority = Priority(30);
    pub const INFO: Priority = Priority(40);
    pub const NOTICE: Priority = Priority(50);
    pub const WARNING: Priority = Priority(60);
    pub const ERROR: Priority = Priority(70);
    pub const CRITICAL: Priority = Priority(80);
    pub const ALERT: Priority = Priority(90);
    pub const EMERGENCY: Priority = Priority(100);

    /// Every valid level, least severe first.
    pub const ALL: [Priority; 9] = [
        Priority::TRACE,
        Priority::DEBUG,
        Priority::INFO,
        Priority::NOTICE,
        Priority::WARNING,
        Priority::ERROR,
        Priority::CRITICAL,
        Priority::ALERT,
        Priority::EMERGENCY,
    ];

    /// Raw wire encoding.
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// True only for members of [`Priority::ALL`].
    pub fn is_valid(self) -> bool {
        Self::ALL.contains(&self)
    }

    /// Canonical lowercase name of a valid level.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Priority::TRACE => "trace",
            Priority::DEBUG => "debug",
            Priority::INFO => "info",
            Priority::NOTICE => "notice",
            Priority::WARNING => "warning",
            Priority::ERROR => "error",
            Priority::CRITICAL => "critical",
            Priority::ALERT => "alert",
            Priority::EMERGENCY => "emergency",
            _ => return None,
        };
        Some(name)
    }

    /// Closest `tracing` level, for handing messages to a tracing subscriber.
    ///
    /// `tracing` has five levels, so notice folds into info and everything
    /// from error upwards folds into error.
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        let level = match self {
            Priority::TRACE => tracing::Level::TRACE,
            Priority::DEBUG => tracing::Level::DEBUG,
            Priority::INFO | Priority::NOTICE => tracing::Level::INFO,
            Priority::WARNING => tracing::Level::WARN,
            Priority::ERROR | Priority::CRITICAL | Priority::ALERT | Priority::EMERGENCY => {
                tracing::Level::ERROR
            }
            _ => return None,
        };
        Some(level)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::INVALID
    }
}

impl From<u16> for Priority {
    fn from(value: u16) -> Self {
        Priority(value)
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_u16(self.0),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if *self == Priority::INVALID => f.write_str("invalid"),
            None => write!(f, "priority({})", self.0),
        }
    }
}

impl FromStr for Priority {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered == "warn" {
            return Ok(Priority::WARNING);
        }
        Priority::ALL
            .into_iter()
            .find(|p| p.name() == Some(lowered.as_str()))
            .ok_or_else(|| MessageError::UnknownPriority(s.to_string()))
    }
}

/// Accepted serialized forms: a level name or a numeric encoding.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriorityRepr {
    Code(u16),
    Name(String),
}

impl TryFrom<PriorityRepr> for Priority {
    type Error = MessageError;

    fn try_from(repr: PriorityRepr) -> Result<Self, Self::Error> {
        match repr {
            PriorityRepr::Name(name) => name.parse(),
            PriorityRepr::Code(code) => {
                let priority = Priority::from(code);
                if priority.is_valid() {
                    Ok(priority)
                } else {
                    Err(MessageError::InvalidPriority(priority))
                }
            }
        }
    }
}
