// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The host's stock layout, used whenever the easy reporter isn't active.

use super::{
    DisplayMode, DisplaySettings, TracebackStyle,
    formatters::{display_path, failure_headline, location_line},
    summary::{
        HOST_ENTRY_SEPARATOR, write_report_body, write_session_header, write_stats_line,
        write_teardown_sections,
    },
    terminal::TerminalWriter,
};
use crate::{
    identity::TestIdentity,
    reporter::{
        events::{Location, RunStarted, TestReport},
        helpers::word_markup,
        hooks::ReportHooks,
        stats::RunStats,
        status::{Markup, StatusClassification, StatusClassifier, categories},
    },
    write_str::WriteStr,
};
use camino::Utf8PathBuf;
use debug_ignore::DebugIgnore;
use std::{io, time::Duration};

/// Renders progress markers per file, or one line per test in long mode.
#[derive(Debug)]
pub struct DefaultReporter {
    settings: DisplaySettings,
    classifier: DebugIgnore<Box<dyn StatusClassifier>>,
    terminal: TerminalWriter,
    stats: RunStats,
    root: Option<Utf8PathBuf>,
}

impl DefaultReporter {
    /// Creates a new default reporter.
    pub fn new(settings: DisplaySettings, classifier: Box<dyn StatusClassifier>) -> Self {
        let terminal = TerminalWriter::new(settings.width, settings.styles());
        let root = settings.root.clone();
        Self {
            settings,
            classifier: DebugIgnore(classifier),
            terminal,
            stats: RunStats::default(),
            root,
        }
    }

    fn summary_errors(&mut self, style: TracebackStyle, out: &mut dyn WriteStr) -> io::Result<()> {
        let reports = self.stats.reports(categories::ERROR);
        if reports.is_empty() || style == TracebackStyle::No {
            return Ok(());
        }
        self.terminal
            .write_sep(out, "=", Some("ERRORS"), Markup::NONE)?;
        for report in reports {
            let headline = format!(
                "ERROR at {} of {}",
                report.phase,
                failure_headline(report)
            );
            write_entry(&mut self.terminal, &self.stats, out, report, &headline, style)?;
        }
        Ok(())
    }

    fn summary_failures(
        &mut self,
        style: TracebackStyle,
        out: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let reports = self.stats.reports(categories::FAILED);
        if reports.is_empty() || style == TracebackStyle::No {
            return Ok(());
        }
        self.terminal
            .write_sep(out, "=", Some("FAILURES"), Markup::NONE)?;
        for report in reports {
            if style == TracebackStyle::Line {
                self.terminal
                    .write_line(out, &report.crash_line(), Markup::NONE)?;
                continue;
            }
            let headline = failure_headline(report);
            write_entry(&mut self.terminal, &self.stats, out, report, &headline, style)?;
        }
        Ok(())
    }
}

fn write_entry(
    terminal: &mut TerminalWriter,
    stats: &RunStats,
    out: &mut dyn WriteStr,
    report: &TestReport,
    headline: &str,
    style: TracebackStyle,
) -> io::Result<()> {
    terminal.write_sep(out, "_", Some(headline), Markup::red().with_bold())?;
    write_report_body(terminal, out, report, style, HOST_ENTRY_SEPARATOR)?;
    write_teardown_sections(terminal, out, stats, &report.identity)
}

impl ReportHooks for DefaultReporter {
    fn on_run_start(&mut self, run: &RunStarted, out: &mut dyn WriteStr) -> io::Result<()> {
        self.stats = RunStats::default();
        self.terminal.reset();
        if self.settings.root.is_none() {
            self.root = run.root.clone();
        }
        write_session_header(&mut self.terminal, out, run)
    }

    fn on_test_location_announce(
        &mut self,
        identity: &TestIdentity,
        location: Option<&Location>,
        out: &mut dyn WriteStr,
    ) -> io::Result<()> {
        match self.settings.display_mode {
            DisplayMode::Long => {
                let line = location_line(identity, location);
                self.terminal
                    .write_ensure_prefix(out, &line, "", Markup::NONE)
            }
            DisplayMode::Grouped => {
                let path = display_path(
                    identity.file(),
                    self.root.as_deref(),
                    self.settings.cwd.as_deref(),
                );
                self.terminal
                    .write_fspath_result(out, path.as_str(), "", Markup::NONE)
            }
            DisplayMode::Quiet => Ok(()),
        }
    }

    fn on_test_result(
        &mut self,
        report: &TestReport,
        out: &mut dyn WriteStr,
    ) -> io::Result<StatusClassification> {
        let classification = self.classifier.classify(report);
        self.stats
            .record(&classification.category, report.clone());
        if classification.is_silent() {
            return Ok(classification);
        }

        let markup = word_markup(&classification.word, report);
        if self.settings.display_mode != DisplayMode::Long {
            self.terminal.write(out, &classification.marker, markup)?;
            return Ok(classification);
        }

        let line = location_line(&report.identity, report.location.as_ref());
        let word = classification.word.text();
        match &report.worker {
            Some(worker) => {
                self.terminal.ensure_newline(out)?;
                self.terminal
                    .write(out, &format!("[{worker}] "), Markup::NONE)?;
                self.terminal.write(out, word, markup)?;
                self.terminal
                    .write(out, &format!(" {line}"), Markup::NONE)?;
                self.terminal.detach();
            }
            None => self.terminal.write_ensure_prefix(out, &line, word, markup)?,
        }
        Ok(classification)
    }

    fn on_run_finish(
        &mut self,
        elapsed: Option<Duration>,
        out: &mut dyn WriteStr,
    ) -> io::Result<()> {
        out.write_str("\n")?;
        let style = self.settings.traceback_style;
        self.summary_errors(style, out)?;
        self.summary_failures(style, out)?;
        write_stats_line(&mut self.terminal, out, &self.stats, elapsed)
    }

    fn stats(&self) -> &RunStats {
        &self.stats
    }
}
