// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render the results of a test run for humans.
//!
//! The main type here is [`Reporter`], which is constructed via a [`ReporterBuilder`]. It hands
//! events to either the [`DefaultReporter`] or the [`EasyReporter`].

mod displayer;
mod events;
mod helpers;
mod hooks;
mod imp;
mod stats;
mod status;

pub use displayer::*;
pub use events::*;
pub use hooks::ReportHooks;
pub use imp::*;
pub use stats::RunStats;
pub use status::*;
