// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading event streams produced by host test runners.
//!
//! The main type here is [`EventReader`], which turns lines of input into [`TestEvent`]s. Every
//! stream it yields starts with [`TestEvent::RunStarted`] and ends with
//! [`TestEvent::RunFinished`], even if the input lacks them.

mod libtest;
mod native;

use crate::{
    errors::ParseEventError,
    reporter::{RunStarted, TestEvent},
};
pub use libtest::DEFAULT_BINARY_ID;
use std::{
    collections::VecDeque,
    fmt,
    io::{self, BufRead},
    str::FromStr,
};
use tracing::debug;

/// The encoding of an event stream.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum EventFormat {
    /// easyread's own JSON-lines format, described in `easyread-metadata`.
    #[default]
    Native,

    /// libtest's JSON output.
    LibtestJson,
}

impl EventFormat {
    /// All known formats, with the names accepted by [`FromStr`].
    pub const ALL: &'static [(&'static str, EventFormat)] = &[
        ("native", EventFormat::Native),
        ("libtest-json", EventFormat::LibtestJson),
    ];
}

impl fmt::Display for EventFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventFormat::Native => f.write_str("native"),
            EventFormat::LibtestJson => f.write_str("libtest-json"),
        }
    }
}

impl FromStr for EventFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, format)| *format)
            .ok_or_else(|| format!("unknown event format `{s}`"))
    }
}

/// Decodes single lines of input into zero or more events.
trait DecodeEvents: fmt::Debug {
    fn decode(&mut self, line: &str, events: &mut Vec<TestEvent>) -> serde_json::Result<()>;

    /// Called once the input is exhausted.
    fn finish(&mut self, _events: &mut Vec<TestEvent>) {}
}

/// Reads events from lines of input.
#[derive(Debug)]
pub struct EventReader<R> {
    input: String,
    lines: io::Lines<R>,
    line_number: usize,
    decoder: Box<dyn DecodeEvents>,
    pending: VecDeque<TestEvent>,
    run_started: bool,
    run_finished: bool,
    exhausted: bool,
}

impl<R: BufRead> EventReader<R> {
    /// Creates a new reader.
    ///
    /// `input` names the input in error messages. `binary_id` is used to root test names in
    /// libtest output.
    pub fn new(
        input: impl Into<String>,
        reader: R,
        format: EventFormat,
        binary_id: Option<String>,
    ) -> Self {
        let decoder: Box<dyn DecodeEvents> = match format {
            EventFormat::Native => Box::new(native::NativeDecoder),
            EventFormat::LibtestJson => Box::new(libtest::LibtestDecoder::new(binary_id)),
        };
        Self {
            input: input.into(),
            lines: reader.lines(),
            line_number: 0,
            decoder,
            pending: VecDeque::new(),
            run_started: false,
            run_finished: false,
            exhausted: false,
        }
    }

    fn enqueue(&mut self, events: Vec<TestEvent>) {
        for event in events {
            match &event {
                TestEvent::RunStarted(_) => self.run_started = true,
                TestEvent::RunFinished { .. } => self.run_finished = true,
                _ => {}
            }
            self.ensure_started();
            self.pending.push_back(event);
        }
    }

    fn ensure_started(&mut self) {
        if !self.run_started {
            debug!("{}: no run-started event, synthesizing one", self.input);
            self.run_started = true;
            self.pending
                .push_back(TestEvent::RunStarted(RunStarted::default()));
        }
    }

    fn finish(&mut self) {
        self.exhausted = true;
        let mut events = Vec::new();
        self.decoder.finish(&mut events);
        self.enqueue(events);
        self.ensure_started();
        if !self.run_finished {
            debug!("{}: no run-finished event, synthesizing one", self.input);
            self.run_finished = true;
            self.pending
                .push_back(TestEvent::RunFinished { elapsed: None });
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<TestEvent, ParseEventError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.exhausted {
                return None;
            }

            match self.lines.next() {
                None => self.finish(),
                Some(Err(error)) => {
                    self.exhausted = true;
                    return Some(Err(ParseEventError::Read {
                        input: self.input.clone(),
                        error,
                    }));
                }
                Some(Ok(line)) => {
                    self.line_number += 1;
                    if line.trim().is_empty() {
                        continue;
                    }
                    let mut events = Vec::new();
                    if let Err(error) = self.decoder.decode(&line, &mut events) {
                        return Some(Err(ParseEventError::Decode {
                            input: self.input.clone(),
                            line: self.line_number,
                            error,
                        }));
                    }
                    self.enqueue(events);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn kinds(input: &str, format: EventFormat) -> Vec<Result<&'static str, String>> {
        EventReader::new("<test>", input.as_bytes(), format, None)
            .map(|event| {
                event
                    .map(|event| match event {
                        TestEvent::RunStarted(_) => "run-started",
                        TestEvent::TestStarted { .. } => "test-started",
                        TestEvent::TestReport(_) => "test-report",
                        TestEvent::RunFinished { .. } => "run-finished",
                    })
                    .map_err(|error| error.to_string())
            })
            .collect()
    }

    #[test]
    fn missing_run_events_are_synthesized() {
        let input = indoc! {r#"
            {"type":"test-started","node-id":"test_a.py::test_one"}

            {"type":"test-report","node-id":"test_a.py::test_one","when":"call","outcome":"passed"}
        "#};
        assert_eq!(
            kinds(input, EventFormat::Native),
            [
                Ok("run-started"),
                Ok("test-started"),
                Ok("test-report"),
                Ok("run-finished"),
            ]
        );
    }

    #[test]
    fn empty_input_is_an_empty_run() {
        assert_eq!(
            kinds("", EventFormat::Native),
            [Ok("run-started"), Ok("run-finished")]
        );
    }

    #[test]
    fn present_run_events_are_kept() {
        let input = indoc! {r#"
            {"type":"run-started","test-count":0}
            {"type":"run-finished","duration":0.01}
        "#};
        assert_eq!(
            kinds(input, EventFormat::Native),
            [Ok("run-started"), Ok("run-finished")]
        );
    }

    #[test]
    fn decode_errors_carry_line_numbers() {
        let input = indoc! {r#"
            {"type":"run-started"}
            not json
        "#};
        let results = kinds(input, EventFormat::Native);
        assert_eq!(results[0], Ok("run-started"));
        assert_eq!(results[1], Err("<test>:2: invalid event".to_owned()));
    }

    #[test]
    fn libtest_streams_are_finished_by_the_decoder() {
        let input = indoc! {r#"
            {"type":"suite","event":"started","test_count":1}
            {"type":"test","name":"works","event":"ok"}
            {"type":"suite","event":"ok","passed":1,"failed":0,"ignored":0,"exec_time":0.1}
        "#};
        assert_eq!(
            kinds(input, EventFormat::LibtestJson),
            [
                Ok("run-started"),
                Ok("test-started"),
                Ok("test-report"),
                Ok("run-finished"),
            ]
        );
    }

    #[test]
    fn formats_round_trip_through_names() {
        for (name, format) in EventFormat::ALL {
            assert_eq!(name.parse::<EventFormat>(), Ok(*format));
            assert_eq!(format.to_string(), *name);
        }
        assert!("junit".parse::<EventFormat>().is_err());
    }
}
