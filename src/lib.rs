// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // message defaults loaded from yaml/toml
pub mod errors;        // error handling
pub mod level;         // priorities
pub mod message;       // the message types
pub mod observability; // diagnostics for the core itself

pub use errors::MessageError;
pub use level::Priority;
pub use message::{Composer, JsonMessage};
