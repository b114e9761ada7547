// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding of libtest's JSON output (`--format json -Z unstable-options`).
//!
//! libtest emits one object per line, tagged by `type`:
//!
//! ```json
//! {"type":"suite","event":"started","test_count":2}
//! {"type":"test","event":"started","name":"tests::passes"}
//! {"type":"test","name":"tests::passes","event":"ok","exec_time":0.001}
//! {"type":"test","name":"tests::fails","event":"failed","stdout":"thread 'tests::fails' panicked at src/lib.rs:9:9:\n..."}
//! {"type":"suite","event":"failed","passed":1,"failed":1,"ignored":0,"exec_time":0.002}
//! ```
//!
//! Test names become identities rooted at the test binary, so `tests::fails` in binary `my-crate`
//! is shown under the `my-crate` header, inside the `tests` container. Runners that prefix names
//! with `binary-id$` have that binary id used instead.

use super::{DecodeEvents, native::seconds_to_duration};
use crate::{
    identity::{NODE_ID_SEPARATOR, TestIdentity},
    reporter::{
        CrashLine, FailureDetail, Outcome, Phase, RunStarted, TestEvent, TestReport,
    },
};
use camino::Utf8PathBuf;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// The binary id used when none is configured and the test name doesn't carry one.
pub const DEFAULT_BINARY_ID: &str = "libtest";

/// Separates a binary id from a test name in names emitted by runners that aggregate binaries.
const BINARY_ID_SEPARATOR: char = '$';

const PANICKED_AT: &str = "panicked at ";

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LibtestEvent {
    Suite(SuiteEvent),
    Test(LibtestTestEvent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct SuiteEvent {
    event: String,
    #[serde(default)]
    test_count: Option<usize>,
    #[serde(default)]
    exec_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LibtestTestEvent {
    event: String,
    name: String,
    #[serde(default)]
    exec_time: Option<f64>,
    #[serde(default)]
    stdout: Option<String>,
}

/// Decodes libtest JSON lines.
#[derive(Debug)]
pub(super) struct LibtestDecoder {
    binary_id: String,
    suite_started: bool,
    elapsed: Option<Duration>,
}

impl LibtestDecoder {
    pub(super) fn new(binary_id: Option<String>) -> Self {
        Self {
            binary_id: binary_id.unwrap_or_else(|| DEFAULT_BINARY_ID.to_owned()),
            suite_started: false,
            elapsed: None,
        }
    }

    fn identity(&self, name: &str) -> TestIdentity {
        let (binary_id, test_path) = match name.split_once(BINARY_ID_SEPARATOR) {
            Some((binary_id, test_path)) => (binary_id, test_path),
            None => (self.binary_id.as_str(), name),
        };
        let mut segments: Vec<&str> = test_path.split(NODE_ID_SEPARATOR).collect();
        // split always yields at least one segment.
        let test_name = segments.pop().unwrap_or_default();
        TestIdentity::new(Utf8PathBuf::from(binary_id), segments, test_name)
    }

    fn decode_suite(&mut self, suite: SuiteEvent, events: &mut Vec<TestEvent>) {
        match suite.event.as_str() {
            "started" if !self.suite_started => {
                self.suite_started = true;
                events.push(TestEvent::RunStarted(RunStarted {
                    root: None,
                    test_count: suite.test_count,
                    ..RunStarted::default()
                }));
            }
            "started" => {
                debug!("libtest: ignoring start of an additional suite");
            }
            _ => {
                if let Some(elapsed) = suite.exec_time.and_then(seconds_to_duration) {
                    self.elapsed = Some(self.elapsed.unwrap_or_default() + elapsed);
                }
            }
        }
    }

    fn decode_test(&mut self, test: LibtestTestEvent, events: &mut Vec<TestEvent>) {
        let outcome = match test.event.as_str() {
            "ok" => Outcome::Passed,
            "failed" => Outcome::Failed,
            "ignored" => Outcome::Skipped,
            other => {
                // Tests are announced together with their result, since libtest runs tests
                // concurrently and start events arrive in batches.
                debug!("libtest: skipping `{other}` event for {}", test.name);
                return;
            }
        };

        let identity = self.identity(&test.name);
        events.push(TestEvent::TestStarted {
            identity: identity.clone(),
            location: None,
        });

        let mut report = TestReport::new(identity, Phase::Call, outcome);
        report.duration = test
            .exec_time
            .and_then(seconds_to_duration)
            .unwrap_or_default();
        if outcome == Outcome::Failed {
            let stdout = test.stdout.unwrap_or_default();
            report.failure = Some(FailureDetail {
                crash: parse_panic_location(&stdout),
                entries: if stdout.is_empty() {
                    Vec::new()
                } else {
                    vec![stdout]
                },
            });
        }
        events.push(TestEvent::TestReport(Box::new(report)));
    }
}

impl DecodeEvents for LibtestDecoder {
    fn decode(&mut self, line: &str, events: &mut Vec<TestEvent>) -> serde_json::Result<()> {
        match serde_json::from_str::<LibtestEvent>(line)? {
            LibtestEvent::Suite(suite) => self.decode_suite(suite, events),
            LibtestEvent::Test(test) => self.decode_test(test, events),
            LibtestEvent::Other => debug!("libtest: skipping event: {line}"),
        }
        Ok(())
    }

    fn finish(&mut self, events: &mut Vec<TestEvent>) {
        events.push(TestEvent::RunFinished {
            elapsed: self.elapsed,
        });
    }
}

/// Extracts the crash line from panic output such as
/// `thread 'x' panicked at src/lib.rs:9:9:\nassertion failed`.
fn parse_panic_location(output: &str) -> Option<CrashLine> {
    let start = output.find(PANICKED_AT)? + PANICKED_AT.len();
    let mut lines = output[start..].lines();
    let location = lines.next()?.trim_end().strip_suffix(':')?;

    // path:line:column
    let mut parts = location.rsplitn(3, ':');
    let _column = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let path = parts.next()?;

    Some(CrashLine {
        path: Utf8PathBuf::from(path),
        line: Some(line),
        message: lines.next().unwrap_or_default().trim().to_owned(),
    })
}
