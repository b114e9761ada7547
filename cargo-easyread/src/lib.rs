// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render test runs as readable, specification-style reports.
//!
//! `cargo easyread` reads the event stream of a test run, from a file or standard input, and
//! renders it either the way the host runner would or, with `--easy`, as one plain-language line
//! per test grouped under file and class headers.
//!
//! ```text
//! cargo test -- -Z unstable-options --format json | cargo easyread --easy --format libtest-json
//! ```

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter, StderrStyles};
