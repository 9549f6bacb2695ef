// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability for the message core itself.
//!
//! Messages never perform I/O, but the places where they swallow or reject
//! something still leave a trace through `tracing`. Event types live in
//! [`messages`] and follow a struct-based pattern with a `Display` impl, so the
//! wording of every diagnostic lives in one place.
//!
//! # Usage
//!
//! ```rust
//! use loglet::observability::messages::{message::PriorityRejected, StructuredLog};
//! use loglet::Priority;
//!
//! loglet::observability::init("debug");
//!
//! PriorityRejected {
//!     requested: Priority::from(25),
//!     current: Priority::INFO,
//! }
//! .log();
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter` when set. Uses
/// `try_init`, so tests and embedding applications can call this more than
/// once without panicking; only the first call has an effect.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
