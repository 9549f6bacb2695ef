// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Severity levels for log messages.
//!
//! A [`Priority`] is a small integer encoding, but only the nine encodings in
//! [`Priority::ALL`] are valid levels. Everything else, including encodings
//! that fall between two defined levels, is rejected wherever a level is
//! assigned.

mod priority;

pub use priority::Priority;
