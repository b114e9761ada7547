// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The serialized form of a host test runner's lifecycle events.
//!
//! A host emits one JSON object per line. Every object carries a `type` tag naming the event:
//!
//! ```json
//! {"type":"run-started","root":"/repo","test-count":2}
//! {"type":"test-started","node-id":"test_a.py::test_one","location":{"file":"test_a.py","line":3}}
//! {"type":"test-report","node-id":"test_a.py::test_one","when":"call","outcome":"passed"}
//! {"type":"run-finished","duration":0.12}
//! ```

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A single lifecycle event, as produced by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WireEvent {
    /// The test run started.
    RunStarted(WireRunStarted),

    /// A test is about to run. Emitted once per test, before any of its reports.
    TestStarted(WireTestStarted),

    /// A phase of a test finished.
    TestReport(WireTestReport),

    /// The test run finished.
    RunFinished(WireRunFinished),
}

impl WireEvent {
    /// Parses a single line of JSON into an event.
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Serializes this event into a single line of JSON, without a trailing newline.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Data for [`WireEvent::RunStarted`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireRunStarted {
    /// The root directory that node ids are relative to.
    #[serde(default)]
    pub root: Option<Utf8PathBuf>,

    /// The number of tests collected, if known.
    #[serde(default)]
    pub test_count: Option<usize>,

    /// The role of the process emitting the stream.
    #[serde(default)]
    pub role: WireProcessRole,
}

/// The role of the process that produced an event stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireProcessRole {
    /// The primary process, which owns the terminal.
    #[default]
    Controller,

    /// A secondary worker in a distributed run. Its controller is responsible for output.
    Worker,
}

/// Data for [`WireEvent::TestStarted`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireTestStarted {
    /// The hierarchical node id, e.g. `tests/test_a.py::TestClass::test_method`.
    pub node_id: String,

    /// Where the test is defined.
    #[serde(default)]
    pub location: Option<WireLocation>,
}

/// Data for [`WireEvent::TestReport`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireTestReport {
    /// The hierarchical node id.
    pub node_id: String,

    /// The phase this report is for.
    pub when: WirePhase,

    /// The outcome of the phase.
    pub outcome: WireOutcome,

    /// Where the test is defined.
    #[serde(default)]
    pub location: Option<WireLocation>,

    /// The failure representation, for failed phases.
    #[serde(default)]
    pub longrepr: Option<WireLongRepr>,

    /// Captured output sections, e.g. `Captured stdout call`.
    #[serde(default)]
    pub sections: Vec<WireSection>,

    /// The distributed worker that ran this phase, if any.
    #[serde(default)]
    pub worker: Option<String>,

    /// How long the phase took, in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
}

/// The phase of a test a report is for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WirePhase {
    /// Fixture setup.
    Setup,
    /// The test body.
    Call,
    /// Fixture teardown.
    Teardown,
}

/// The outcome of a phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireOutcome {
    /// The phase passed.
    Passed,
    /// The phase failed.
    Failed,
    /// The phase was skipped.
    Skipped,
}

/// Location information for a test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireLocation {
    /// The file the test is defined in.
    pub file: Utf8PathBuf,

    /// The line the test is defined on, if known.
    #[serde(default)]
    pub line: Option<u32>,

    /// The qualified name of the test within the file, e.g. `TestClass.test_method`.
    #[serde(default)]
    pub domain: Option<String>,
}

/// The failure representation for a failed phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireLongRepr {
    /// Traceback entries, outermost first. Each entry is a pre-rendered block of text.
    #[serde(default)]
    pub entries: Vec<String>,

    /// The location and message of the crash, if known.
    #[serde(default)]
    pub crash: Option<WireCrash>,
}

/// The point at which a test crashed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireCrash {
    /// The file the crash occurred in.
    pub path: Utf8PathBuf,

    /// The line the crash occurred on.
    #[serde(default)]
    pub line: Option<u32>,

    /// The crash message.
    pub message: String,
}

/// A captured output section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireSection {
    /// The section name, e.g. `Captured stdout teardown`.
    pub name: String,

    /// The captured text.
    pub content: String,
}

/// Data for [`WireEvent::RunFinished`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireRunFinished {
    /// How long the whole run took, in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
}
