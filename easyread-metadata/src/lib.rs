// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Machine-readable formats shared between host test runners and
//! [cargo easyread](https://crates.io/crates/cargo-easyread).
//!
//! This crate contains the serialized form of a host's lifecycle event stream ([`WireEvent`]) and
//! the documented exit codes of `cargo easyread` ([`EasyreadExitCode`]).

mod events;
mod exit_codes;

pub use events::*;
pub use exit_codes::*;
