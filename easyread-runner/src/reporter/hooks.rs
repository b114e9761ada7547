// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The callbacks a reporter implements.

use super::{
    events::{Location, RunStarted, TestReport},
    stats::RunStats,
    status::StatusClassification,
};
use crate::{identity::TestIdentity, write_str::WriteStr};
use std::{io, time::Duration};

/// Lifecycle callbacks invoked by [`Reporter`](super::Reporter), in event order, on a single
/// thread.
///
/// Implementations render output into the writer they're handed. Only I/O errors from that
/// writer are returned: rendering itself never fails.
pub trait ReportHooks {
    /// Called once when the run starts. Resets all per-run state.
    fn on_run_start(&mut self, run: &RunStarted, out: &mut dyn WriteStr) -> io::Result<()>;

    /// Called once per test, right before its result is known.
    fn on_test_location_announce(
        &mut self,
        identity: &TestIdentity,
        location: Option<&Location>,
        out: &mut dyn WriteStr,
    ) -> io::Result<()>;

    /// Called for every phase of every test. Returns how the report was classified.
    fn on_test_result(
        &mut self,
        report: &TestReport,
        out: &mut dyn WriteStr,
    ) -> io::Result<StatusClassification>;

    /// Called once when the run finishes. Writes the summaries and the final stats line.
    fn on_run_finish(
        &mut self,
        elapsed: Option<Duration>,
        out: &mut dyn WriteStr,
    ) -> io::Result<()>;

    /// Returns the statistics gathered so far.
    fn stats(&self) -> &RunStats;
}
