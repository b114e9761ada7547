// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use easyread_runner::{
    input::{EventFormat, EventReader},
    reporter::{ActiveReporter, ReporterBuilder, ReporterStderr, TestEvent},
};
use std::{fs::File, io::BufReader};

/// The root recorded in the native fixtures.
pub(crate) const FIXTURE_ROOT: &str = "/project";

pub(crate) fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures")
        .join(name)
}

#[derive(Debug)]
pub(crate) struct Rendered {
    pub(crate) output: String,
    pub(crate) is_success: bool,
    pub(crate) active: ActiveReporter,
}

impl Rendered {
    /// The output with trailing whitespace removed from each line.
    pub(crate) fn trimmed(&self) -> String {
        trim_lines(&self.output)
    }
}

pub(crate) fn trim_lines(output: &str) -> String {
    output
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replays a fixture through a reporter configured by `configure`.
pub(crate) fn render(
    name: &str,
    format: EventFormat,
    configure: impl FnOnce(&mut ReporterBuilder),
) -> Rendered {
    let path = fixture_path(name);
    let file = File::open(&path).unwrap_or_else(|error| panic!("opening {path}: {error}"));
    let events = EventReader::new(path.as_str(), BufReader::new(file), format, None)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|error| panic!("reading {path}: {error}"));
    render_events(events, configure)
}

/// Replays events through a reporter configured by `configure`.
pub(crate) fn render_events(
    events: impl IntoIterator<Item = TestEvent>,
    configure: impl FnOnce(&mut ReporterBuilder),
) -> Rendered {
    let mut builder = ReporterBuilder::default();
    builder.set_cwd(FIXTURE_ROOT.into());
    configure(&mut builder);

    let mut buf = Vec::new();
    let (is_success, active) = {
        let mut reporter = builder.build(ReporterStderr::Buffer(&mut buf));
        for event in events {
            reporter.report_event(event).expect("writing to a buffer succeeds");
        }
        (reporter.is_success(), reporter.active())
    };

    Rendered {
        output: String::from_utf8(buf).expect("output is UTF-8"),
        is_success,
        active,
    }
}

pub(crate) fn easy(builder: &mut ReporterBuilder) {
    builder.set_easy(true);
}
