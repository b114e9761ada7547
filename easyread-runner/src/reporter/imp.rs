// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatches test events to the active displayer.
//!
//! The main structure in this module is [`Reporter`].

use super::{
    displayer::{DefaultReporter, DisplayMode, DisplaySettings, EasyReporter, TracebackStyle},
    events::{ProcessRole, RunStarted, TestEvent},
    hooks::ReportHooks,
    stats::RunStats,
    status::{
        ConfiguredStatusClassifier, DefaultStatusClassifier, StatusClassifier,
        StatusWordOverrides,
    },
};
use crate::{
    console::{DEFAULT_TERMINAL_WIDTH, sanitize_width},
    errors::WriteEventError,
    write_str::WriteStr,
};
use camino::Utf8PathBuf;
use debug_ignore::DebugIgnore;
use std::io::{self, BufWriter, Stderr};
use tracing::{debug, info};

/// Standard error destination for the reporter.
///
/// This is usually a terminal, but can be an in-memory buffer for tests.
pub enum ReporterStderr<'a> {
    /// Produce output on the (possibly piped) terminal.
    Terminal,

    /// Write output to a buffer.
    Buffer(&'a mut Vec<u8>),
}

/// Test reporter builder.
#[derive(Debug, Default)]
pub struct ReporterBuilder {
    easy: bool,
    worker: bool,
    should_colorize: bool,
    display_mode: DisplayMode,
    traceback_style: TracebackStyle,
    width: Option<usize>,
    status_words: StatusWordOverrides,
    root: Option<Utf8PathBuf>,
    cwd: Option<Utf8PathBuf>,
}

impl ReporterBuilder {
    /// Requests the easy reporter.
    ///
    /// The easy reporter is installed when the run starts, unless this process is a worker.
    pub fn set_easy(&mut self, easy: bool) -> &mut Self {
        self.easy = easy;
        self
    }

    /// Marks this process as a secondary worker whose output is collected by a controller.
    pub fn set_worker(&mut self, worker: bool) -> &mut Self {
        self.worker = worker;
        self
    }

    /// Set to true if the reporter should colorize output.
    pub fn set_colorize(&mut self, should_colorize: bool) -> &mut Self {
        self.should_colorize = should_colorize;
        self
    }

    /// Sets how tests are laid out while the run is in progress.
    pub fn set_display_mode(&mut self, display_mode: DisplayMode) -> &mut Self {
        self.display_mode = display_mode;
        self
    }

    /// Sets how failure details are rendered.
    pub fn set_traceback_style(&mut self, traceback_style: TracebackStyle) -> &mut Self {
        self.traceback_style = traceback_style;
        self
    }

    /// Sets the terminal width. Widths under 40 columns are replaced with the default.
    pub fn set_width(&mut self, width: usize) -> &mut Self {
        self.width = Some(sanitize_width(width));
        self
    }

    /// Sets replacement status words.
    pub fn set_status_words(&mut self, status_words: StatusWordOverrides) -> &mut Self {
        self.status_words = status_words;
        self
    }

    /// Sets the directory node ids are relative to, overriding the one announced by the run.
    pub fn set_root(&mut self, root: Utf8PathBuf) -> &mut Self {
        self.root = Some(root);
        self
    }

    /// Sets the directory file headers are shown relative to.
    pub fn set_cwd(&mut self, cwd: Utf8PathBuf) -> &mut Self {
        self.cwd = Some(cwd);
        self
    }
}

impl ReporterBuilder {
    /// Creates a new reporter.
    ///
    /// The default reporter is active until the run starts.
    pub fn build<'a>(&self, output: ReporterStderr<'a>) -> Reporter<'a> {
        let settings = DisplaySettings {
            display_mode: self.display_mode,
            traceback_style: self.traceback_style,
            width: self.width.unwrap_or(DEFAULT_TERMINAL_WIDTH),
            colorize: self.should_colorize,
            root: self.root.clone(),
            cwd: self.cwd.clone(),
        };

        let stderr = match output {
            ReporterStderr::Terminal => ReporterStderrImpl::Terminal(BufWriter::new(io::stderr())),
            ReporterStderr::Buffer(buf) => ReporterStderrImpl::Buffer(buf),
        };

        let hooks: Box<dyn ReportHooks> = Box::new(DefaultReporter::new(
            settings.clone(),
            classifier(&self.status_words),
        ));

        Reporter {
            hooks: DebugIgnore(hooks),
            active: ActiveReporter::Default,
            activation: Activation {
                requested: self.easy,
                is_worker: self.worker,
                attempted: false,
            },
            settings,
            status_words: self.status_words.clone(),
            stderr,
        }
    }
}

fn classifier(status_words: &StatusWordOverrides) -> Box<dyn StatusClassifier> {
    if status_words.is_empty() {
        Box::new(DefaultStatusClassifier)
    } else {
        Box::new(ConfiguredStatusClassifier::new(
            DefaultStatusClassifier,
            status_words.clone(),
        ))
    }
}

/// Which displayer is receiving events.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveReporter {
    /// The host's stock output.
    Default,

    /// The easy reporter.
    Easy,
}

#[derive(Debug)]
struct Activation {
    requested: bool,
    is_worker: bool,
    attempted: bool,
}

#[derive(Debug)]
enum ReporterStderrImpl<'a> {
    Terminal(BufWriter<Stderr>),
    Buffer(&'a mut Vec<u8>),
}

impl ReporterStderrImpl<'_> {
    fn writer(&mut self) -> &mut dyn WriteStr {
        match self {
            ReporterStderrImpl::Terminal(writer) => writer,
            ReporterStderrImpl::Buffer(buf) => &mut **buf,
        }
    }
}

/// Renders test events to standard error, or to a buffer.
#[derive(Debug)]
pub struct Reporter<'a> {
    hooks: DebugIgnore<Box<dyn ReportHooks>>,
    active: ActiveReporter,
    activation: Activation,
    settings: DisplaySettings,
    status_words: StatusWordOverrides,
    stderr: ReporterStderrImpl<'a>,
}

impl Reporter<'_> {
    /// Report a test event.
    pub fn report_event(&mut self, event: TestEvent) -> Result<(), WriteEventError> {
        if let TestEvent::RunStarted(run) = &event {
            self.activate(run);
        }

        let out = self.stderr.writer();
        let hooks = &mut self.hooks;
        match event {
            TestEvent::RunStarted(run) => hooks.on_run_start(&run, out),
            TestEvent::TestStarted { identity, location } => {
                hooks.on_test_location_announce(&identity, location.as_ref(), out)
            }
            TestEvent::TestReport(report) => hooks.on_test_result(&report, out).map(|_| ()),
            TestEvent::RunFinished { elapsed } => hooks.on_run_finish(elapsed, out),
        }
        .and_then(|()| out.write_str_flush())
        .map_err(WriteEventError::Io)
    }

    /// Returns which displayer is receiving events.
    pub fn active(&self) -> ActiveReporter {
        self.active
    }

    /// Returns the statistics gathered so far.
    pub fn stats(&self) -> &RunStats {
        self.hooks.stats()
    }

    /// Returns true if no test failed or errored so far.
    pub fn is_success(&self) -> bool {
        self.stats().is_success()
    }

    /// Installs the easy reporter if it was requested and this is the first run in a controller
    /// process.
    fn activate(&mut self, run: &RunStarted) {
        if !self.activation.requested {
            return;
        }
        if self.activation.attempted {
            debug!("easy reporter activation already decided, ignoring");
            return;
        }
        self.activation.attempted = true;

        if self.activation.is_worker || run.role == ProcessRole::Worker {
            debug!("worker process detected, keeping the default reporter");
            return;
        }

        info!(target: "easyread_runner::reporter", "using the easy reporter");
        self.hooks = DebugIgnore(Box::new(EasyReporter::new(
            self.settings.clone(),
            classifier(&self.status_words),
        )));
        self.active = ActiveReporter::Easy;
    }
}
