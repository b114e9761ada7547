// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events consumed by reporters.
//!
//! These are the typed counterparts of the host's lifecycle hooks. Each event is delivered to the
//! reporter exactly once, in the order the host emitted it.

use crate::identity::TestIdentity;
use camino::Utf8PathBuf;
use std::{fmt, time::Duration};

/// A test lifecycle event.
#[derive(Clone, Debug)]
pub enum TestEvent {
    /// The test run started.
    RunStarted(RunStarted),

    /// A test is about to run.
    TestStarted {
        /// The test that is starting.
        identity: TestIdentity,

        /// Where the test is defined, if the host reported it.
        location: Option<Location>,
    },

    /// A phase of a test finished.
    TestReport(Box<TestReport>),

    /// The test run finished.
    RunFinished {
        /// How long the run took, if the host reported it.
        elapsed: Option<Duration>,
    },
}

/// Data for [`TestEvent::RunStarted`].
#[derive(Clone, Debug, Default)]
pub struct RunStarted {
    /// The root directory that node ids are relative to.
    pub root: Option<Utf8PathBuf>,

    /// The number of tests collected, if known.
    pub test_count: Option<usize>,

    /// The role of the process that produced the events.
    pub role: ProcessRole,
}

/// The role of the process that produced an event stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ProcessRole {
    /// The primary process.
    #[default]
    Controller,

    /// A secondary worker in a distributed run.
    Worker,
}

/// The phase of a test a report belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fixture setup.
    Setup,
    /// The test body.
    Call,
    /// Fixture teardown.
    Teardown,
}

impl Phase {
    /// Returns the host's name for this phase.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Call => "call",
            Phase::Teardown => "teardown",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a single phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The phase passed.
    Passed,
    /// The phase failed.
    Failed,
    /// The phase was skipped.
    Skipped,
}

/// Where a test is defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// The file the test is defined in.
    pub file: Utf8PathBuf,

    /// The line the test is defined on (0-based, as hosts report it).
    pub line: Option<u32>,

    /// The qualified name of the test within the file.
    pub domain: Option<String>,
}

/// Details about a failed phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureDetail {
    /// Traceback entries, outermost first.
    pub entries: Vec<String>,

    /// Where the test crashed, if known.
    pub crash: Option<CrashLine>,
}

/// The condensed location and message of a crash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrashLine {
    /// The file the crash occurred in.
    pub path: Utf8PathBuf,

    /// The line the crash occurred on.
    pub line: Option<u32>,

    /// The crash message.
    pub message: String,
}

impl fmt::Display for CrashLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.path, line, self.message),
            None => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

/// A captured output section attached to a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputSection {
    /// The section name, e.g. `Captured stdout teardown`.
    pub name: String,

    /// The captured text.
    pub content: String,
}

/// The identifier of a distributed worker, e.g. `gw0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkerId(pub String);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The result of one phase of one test.
#[derive(Clone, Debug)]
pub struct TestReport {
    /// The test this report is for.
    pub identity: TestIdentity,

    /// The phase this report is for.
    pub phase: Phase,

    /// The outcome of the phase.
    pub outcome: Outcome,

    /// Where the test is defined.
    pub location: Option<Location>,

    /// Failure details, for failed phases.
    pub failure: Option<FailureDetail>,

    /// Captured output.
    pub sections: Vec<OutputSection>,

    /// The distributed worker that ran this phase, if any.
    pub worker: Option<WorkerId>,

    /// How long the phase took.
    pub duration: Duration,
}

impl TestReport {
    /// Creates a report with no location, failure details, captured output or worker.
    pub fn new(identity: TestIdentity, phase: Phase, outcome: Outcome) -> Self {
        Self {
            identity,
            phase,
            outcome,
            location: None,
            failure: None,
            sections: Vec::new(),
            worker: None,
            duration: Duration::ZERO,
        }
    }

    /// Returns true if the phase passed.
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    /// Returns true if the phase failed.
    pub fn failed(&self) -> bool {
        self.outcome == Outcome::Failed
    }

    /// Returns true if the phase was skipped.
    pub fn skipped(&self) -> bool {
        self.outcome == Outcome::Skipped
    }

    /// Returns the crash line for this report.
    ///
    /// Falls back to the test's location, then its node id, if the host didn't report a crash.
    pub fn crash_line(&self) -> String {
        if let Some(crash) = self.failure.as_ref().and_then(|f| f.crash.as_ref()) {
            return crash.to_string();
        }
        match &self.location {
            Some(Location {
                file,
                line: Some(line),
                ..
            }) => format!(
                "{file}:{}: {}",
                u64::from(*line) + 1,
                self.identity.node_id()
            ),
            _ => self.identity.node_id().to_owned(),
        }
    }
}
