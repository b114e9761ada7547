// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [cargo easyread](https://crates.io/crates/cargo-easyread): reading
//! test events from a host test runner and rendering them in a readable, grouped layout.
//!
//! The flow is: an [`input::EventReader`] decodes events from a stream, and a
//! [`reporter::Reporter`] hands each one to the active displayer, which writes to a
//! [`write_str::WriteStr`] sink.

pub mod console;
pub mod errors;
pub mod identity;
pub mod input;
pub mod reporter;
pub mod user_config;
pub mod write_str;
