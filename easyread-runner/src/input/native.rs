// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::DecodeEvents;
use crate::{
    identity::TestIdentity,
    reporter::{
        CrashLine, FailureDetail, Location, Outcome, OutputSection, Phase, ProcessRole,
        RunStarted, TestEvent, TestReport, WorkerId,
    },
};
use easyread_metadata::{
    WireCrash, WireEvent, WireLocation, WireLongRepr, WireOutcome, WirePhase, WireProcessRole,
    WireTestReport,
};
use std::time::Duration;

/// Decodes the native JSON-lines event stream.
#[derive(Debug, Default)]
pub(super) struct NativeDecoder;

impl DecodeEvents for NativeDecoder {
    fn decode(&mut self, line: &str, events: &mut Vec<TestEvent>) -> serde_json::Result<()> {
        let event = WireEvent::from_json_line(line)?;
        events.push(event_from_wire(event));
        Ok(())
    }
}

pub(super) fn event_from_wire(event: WireEvent) -> TestEvent {
    match event {
        WireEvent::RunStarted(started) => TestEvent::RunStarted(RunStarted {
            root: started.root,
            test_count: started.test_count,
            role: match started.role {
                WireProcessRole::Controller => ProcessRole::Controller,
                WireProcessRole::Worker => ProcessRole::Worker,
            },
        }),
        WireEvent::TestStarted(started) => TestEvent::TestStarted {
            identity: TestIdentity::parse(&started.node_id),
            location: started.location.map(location_from_wire),
        },
        WireEvent::TestReport(report) => TestEvent::TestReport(Box::new(report_from_wire(report))),
        WireEvent::RunFinished(finished) => TestEvent::RunFinished {
            elapsed: finished.duration.and_then(seconds_to_duration),
        },
    }
}

fn report_from_wire(report: WireTestReport) -> TestReport {
    let phase = match report.when {
        WirePhase::Setup => Phase::Setup,
        WirePhase::Call => Phase::Call,
        WirePhase::Teardown => Phase::Teardown,
    };
    let outcome = match report.outcome {
        WireOutcome::Passed => Outcome::Passed,
        WireOutcome::Failed => Outcome::Failed,
        WireOutcome::Skipped => Outcome::Skipped,
    };

    let mut out = TestReport::new(TestIdentity::parse(&report.node_id), phase, outcome);
    out.location = report.location.map(location_from_wire);
    out.failure = report.longrepr.map(failure_from_wire);
    out.sections = report
        .sections
        .into_iter()
        .map(|section| OutputSection {
            name: section.name,
            content: section.content,
        })
        .collect();
    out.worker = report.worker.map(WorkerId);
    out.duration = report
        .duration
        .and_then(seconds_to_duration)
        .unwrap_or_default();
    out
}

fn location_from_wire(location: WireLocation) -> Location {
    Location {
        file: location.file,
        line: location.line,
        domain: location.domain,
    }
}

fn failure_from_wire(longrepr: WireLongRepr) -> FailureDetail {
    FailureDetail {
        entries: longrepr.entries,
        crash: longrepr.crash.map(|WireCrash { path, line, message }| CrashLine {
            path,
            line,
            message,
        }),
    }
}

/// Converts a host-reported number of seconds, ignoring negative or non-finite values.
pub(super) fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds).ok()
}
