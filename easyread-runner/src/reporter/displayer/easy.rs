// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The easy reporter: results grouped under file and class headers, with readable titles and an
//! indexed failure summary.

use super::{
    DisplayMode, DisplaySettings, TracebackStyle,
    formatters::{display_path, location_line},
    summary::{
        EASY_ENTRY_SEPARATOR, write_report_body, write_session_header, write_stats_line,
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
use camino::{Utf8Path, Utf8PathBuf};
use debug_ignore::DebugIgnore;
use indexmap::IndexSet;
use std::{io, time::Duration};
use tracing::debug;

/// Fill between the title of a failure and the end of the line.
const FAILURE_TITLE_FILL: &str = " . ";

/// Fill around the `FAILURES` and `ERRORS` headers.
const SECTION_HEADER_FILL: &str = ".  ";

/// Indentation of class headers within a file.
const CLASS_INDENT: &str = "  ";

/// Per-run bookkeeping of which headers have been written.
#[derive(Clone, Debug)]
pub struct RenderState {
    seen_files: IndexSet<Utf8PathBuf>,
    seen_classes: IndexSet<String>,
    is_first_failure: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            seen_files: IndexSet::new(),
            seen_classes: IndexSet::new(),
            is_first_failure: true,
        }
    }
}

impl RenderState {
    /// Files whose headers were written, in order.
    pub fn seen_files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.seen_files.iter().map(Utf8PathBuf::as_path)
    }

    /// Classes whose headers were written within the current file, in order.
    pub fn seen_classes(&self) -> impl Iterator<Item = &str> {
        self.seen_classes.iter().map(String::as_str)
    }

    /// Returns true until the first failure title has been written.
    pub fn is_first_failure(&self) -> bool {
        self.is_first_failure
    }
}

/// Renders results grouped by file and class.
#[derive(Debug)]
pub struct EasyReporter {
    settings: DisplaySettings,
    classifier: DebugIgnore<Box<dyn StatusClassifier>>,
    terminal: TerminalWriter,
    state: RenderState,
    stats: RunStats,
    root: Option<Utf8PathBuf>,
}

impl EasyReporter {
    /// Creates a new easy reporter.
    pub fn new(settings: DisplaySettings, classifier: Box<dyn StatusClassifier>) -> Self {
        let terminal = TerminalWriter::new(settings.width, settings.styles());
        let root = settings.root.clone();
        Self {
            settings,
            classifier: DebugIgnore(classifier),
            terminal,
            state: RenderState::default(),
            stats: RunStats::default(),
            root,
        }
    }

    /// Returns the header bookkeeping for the current run.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Writes the `FAILURES` section: one indexed, left-aligned title per failed test, in
    /// completion order, followed by its location and details.
    ///
    /// Writes nothing if no test failed or if `style` is [`TracebackStyle::No`].
    pub fn on_run_finish_render_failure_summary(
        &mut self,
        style: TracebackStyle,
        out: &mut dyn WriteStr,
    ) -> io::Result<()> {
        if style == TracebackStyle::No {
            return Ok(());
        }
        let reports = self.stats.reports(categories::FAILED);
        if reports.is_empty() {
            return Ok(());
        }

        self.terminal.write_sep(
            out,
            SECTION_HEADER_FILL,
            Some("FAILURES"),
            Markup::bold(),
        )?;
        for (index, report) in (1..).zip(reports) {
            if style == TracebackStyle::Line {
                self.terminal
                    .write_line(out, &report.crash_line(), Markup::NONE)?;
                continue;
            }
            let title = format!("{index}. {}", report.identity.qualified_title());
            write_failure_entry(
                &mut self.terminal,
                &mut self.state,
                &self.stats,
                out,
                report,
                &title,
                style,
            )?;
        }
        Ok(())
    }

    fn render_error_summary(
        &mut self,
        style: TracebackStyle,
        out: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let reports = self.stats.reports(categories::ERROR);
        if reports.is_empty() || style == TracebackStyle::No {
            return Ok(());
        }

        self.terminal
            .write_sep(out, SECTION_HEADER_FILL, Some("ERRORS"), Markup::bold())?;
        // Errors are numbered separately from failures and don't consume the first-failure
        // spacing.
        let mut errors_state = RenderState::default();
        for (index, report) in (1..).zip(reports) {
            if style == TracebackStyle::Line {
                self.terminal
                    .write_line(out, &report.crash_line(), Markup::NONE)?;
                continue;
            }
            let title = format!(
                "{index}. {} ({} error)",
                report.identity.qualified_title(),
                report.phase,
            );
            write_failure_entry(
                &mut self.terminal,
                &mut errors_state,
                &self.stats,
                out,
                report,
                &title,
                style,
            )?;
        }
        Ok(())
    }

    fn write_path_name(
        &mut self,
        identity: &TestIdentity,
        out: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let file = identity.file();
        if self.state.seen_files.contains(file) {
            return Ok(());
        }
        self.state.seen_classes.clear();
        if !self.state.seen_files.is_empty() {
            out.write_str("\n")?;
        }
        self.state.seen_files.insert(file.to_owned());

        let path = display_path(
            file,
            self.root.as_deref(),
            self.settings.cwd.as_deref(),
        );
        self.terminal
            .write_fspath_result(out, path.as_str(), "", Markup::bold())
    }

    fn write_class_name(
        &mut self,
        identity: &TestIdentity,
        out: &mut dyn WriteStr,
    ) -> io::Result<()> {
        let Some(class_name) = identity.class_name().filter(|_| identity.is_in_class()) else {
            return Ok(());
        };
        if !self.state.seen_classes.insert(class_name.to_owned()) {
            return Ok(());
        }
        self.terminal.write_fspath_result(
            out,
            &format!("{CLASS_INDENT}{class_name}"),
            "",
            Markup::NONE,
        )
    }
}

/// Writes one entry of the failure or error summary: a blank line unless this is the first
/// entry, the title line, the path line and the details.
fn write_failure_entry(
    terminal: &mut TerminalWriter,
    state: &mut RenderState,
    stats: &RunStats,
    out: &mut dyn WriteStr,
    report: &TestReport,
    title: &str,
    style: TracebackStyle,
) -> io::Result<()> {
    if !state.is_first_failure {
        terminal.line(out, "", Markup::NONE)?;
    }
    terminal.ljust_sep(out, FAILURE_TITLE_FILL, title, Markup::red().with_bold())?;
    state.is_first_failure = false;

    let path = location_line(&report.identity, report.location.as_ref());
    terminal.write(out, &format!("   Path: {path}"), Markup::NONE)?;
    terminal.line(out, "", Markup::NONE)?;

    write_report_body(terminal, out, report, style, EASY_ENTRY_SEPARATOR)?;
    write_teardown_sections(terminal, out, stats, &report.identity)
}

impl ReportHooks for EasyReporter {
    fn on_run_start(&mut self, run: &RunStarted, out: &mut dyn WriteStr) -> io::Result<()> {
        self.state = RenderState::default();
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
                self.write_path_name(identity, out)?;
                self.write_class_name(identity, out)
            }
            DisplayMode::Quiet => Ok(()),
        }
    }

    fn on_test_result(
        &mut self,
        report: &TestReport,
        out: &mut dyn WriteStr,
    ) -> io::Result<StatusClassification> {
        let identity = &report.identity;
        let title = format!("{} ", identity.title());
        let classification = self.classifier.classify(report);
        self.stats
            .record(&classification.category, report.clone());
        if classification.is_silent() {
            return Ok(classification);
        }

        let markup = word_markup(&classification.word, report);
        let word = classification.word.text();
        match &report.worker {
            Some(worker) => {
                // Ordering across workers is arbitrary, so grouping is meaningless here.
                self.terminal.ensure_newline(out)?;
                self.terminal
                    .write(out, &format!("[{worker}] "), Markup::NONE)?;
                self.terminal.write(out, word, markup)?;
                let line = location_line(identity, report.location.as_ref());
                self.terminal.write(out, &format!(" {line}"), Markup::NONE)?;
                self.terminal.detach();
            }
            None => {
                let prefix = format!("{}{title}", identity.list_indent());
                self.terminal
                    .write_ensure_prefix(out, &prefix, &format!("({word})"), markup)?;
            }
        }
        Ok(classification)
    }

    fn on_run_finish(
        &mut self,
        elapsed: Option<Duration>,
        out: &mut dyn WriteStr,
    ) -> io::Result<()> {
        // A bare newline that leaves the open line in place: the first section header then adds
        // a blank line of its own.
        out.write_str("\n")?;

        let style = self.settings.traceback_style;
        debug!(
            failed = self.stats.count(categories::FAILED),
            errors = self.stats.count(categories::ERROR),
            %style,
            "rendering easy summaries"
        );
        self.render_error_summary(style, out)?;
        self.on_run_finish_render_failure_summary(style, out)?;
        write_stats_line(&mut self.terminal, out, &self.stats, elapsed)
    }

    fn stats(&self) -> &RunStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{
        events::{FailureDetail, Outcome, OutputSection, Phase, WorkerId},
        status::DefaultStatusClassifier,
    };
    use pretty_assertions::assert_eq;

    fn reporter(display_mode: DisplayMode) -> EasyReporter {
        EasyReporter::new(
            DisplaySettings {
                display_mode,
                ..DisplaySettings::default()
            },
            Box::new(DefaultStatusClassifier),
        )
    }

    fn run_test(
        reporter: &mut EasyReporter,
        out: &mut String,
        node_id: &str,
        outcome: Outcome,
    ) -> TestReport {
        let identity = TestIdentity::parse(node_id);
        reporter
            .on_test_location_announce(&identity, None, out)
            .unwrap();
        let mut last = None;
        for phase in [Phase::Setup, Phase::Call, Phase::Teardown] {
            let phase_outcome = if phase == Phase::Call {
                outcome
            } else {
                Outcome::Passed
            };
            let mut report = TestReport::new(identity.clone(), phase, phase_outcome);
            if phase == Phase::Call && outcome == Outcome::Failed {
                report.failure = Some(FailureDetail {
                    entries: vec![format!("    def {}():\n>       assert 0\nE       assert 0", identity.name())],
                    crash: None,
                });
            }
            reporter.on_test_result(&report, out).unwrap();
            if phase == Phase::Call {
                last = Some(report);
            }
        }
        last.expect("call phase was reported")
    }

    #[test]
    fn grouped_module_level_tests() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        reporter
            .on_run_start(&RunStarted::default(), &mut out)
            .unwrap();
        out.clear();

        run_test(&mut reporter, &mut out, "test_a.py::test_failing_function", Outcome::Failed);
        run_test(&mut reporter, &mut out, "test_a.py::test_passing_function", Outcome::Passed);
        run_test(&mut reporter, &mut out, "test_b.py::test_failing_function", Outcome::Failed);

        assert_eq!(
            out,
            "\ntest_a.py \n  failing function (FAILED)\n  passing function (PASSED)\n\
             \ntest_b.py \n  failing function (FAILED)"
        );
        assert_eq!(
            reporter
                .state()
                .seen_files()
                .map(Utf8Path::as_str)
                .collect::<Vec<_>>(),
            ["test_a.py", "test_b.py"]
        );
    }

    #[test]
    fn grouped_class_tests_reset_classes_per_file() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        reporter
            .on_run_start(&RunStarted::default(), &mut out)
            .unwrap();
        out.clear();

        for file in ["test_a.py", "test_b.py"] {
            run_test(&mut reporter, &mut out, &format!("{file}::TestClassName::test_failing_function"), Outcome::Failed);
            run_test(&mut reporter, &mut out, &format!("{file}::TestClassName::test_passing_function"), Outcome::Passed);
            run_test(&mut reporter, &mut out, &format!("{file}::TestSecondClass::test_passing_function"), Outcome::Passed);
        }

        assert_eq!(
            out,
            "\ntest_a.py \n  TestClassName \n    failing function (FAILED)\n    passing function (PASSED)\
             \n  TestSecondClass \n    passing function (PASSED)\n\
             \ntest_b.py \n  TestClassName \n    failing function (FAILED)\n    passing function (PASSED)\
             \n  TestSecondClass \n    passing function (PASSED)"
        );
        assert_eq!(
            reporter.state().seen_classes().collect::<Vec<_>>(),
            ["TestClassName", "TestSecondClass"]
        );
    }

    #[test]
    fn long_mode_writes_location_lines() {
        let mut reporter = reporter(DisplayMode::Long);
        let mut out = String::new();
        run_test(&mut reporter, &mut out, "test_a.py::test_passing_function", Outcome::Passed);
        assert_eq!(
            out,
            "\ntest_a.py::test_passing_function \n  passing function (PASSED)"
        );
    }

    #[test]
    fn long_mode_names_the_defining_file() {
        let mut reporter = reporter(DisplayMode::Long);
        let mut out = String::new();
        let identity = TestIdentity::parse("test_a.py::test_shared");
        let location = Location {
            file: "helpers/shared.py".into(),
            line: Some(4),
            domain: Some("test_shared".to_owned()),
        };
        reporter
            .on_test_location_announce(&identity, Some(&location), &mut out)
            .unwrap();
        let mut report = TestReport::new(identity, Phase::Call, Outcome::Passed);
        report.location = Some(location);
        reporter.on_test_result(&report, &mut out).unwrap();
        assert_eq!(
            out,
            "\ntest_a.py::test_shared <- helpers/shared.py \n  shared (PASSED)"
        );
    }

    #[test]
    fn quiet_mode_writes_no_headers() {
        let mut reporter = reporter(DisplayMode::Quiet);
        let mut out = String::new();
        run_test(&mut reporter, &mut out, "test_a.py::TestX::test_skip_me", Outcome::Skipped);
        assert_eq!(out, "\n    skip me (SKIPPED)");
    }

    #[test]
    fn worker_reports_are_flat() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        let identity = TestIdentity::parse("test_a.py::test_passing_function");
        let mut report = TestReport::new(identity, Phase::Call, Outcome::Passed);
        report.worker = Some(WorkerId("gw0".to_owned()));

        reporter.on_test_result(&report, &mut out).unwrap();
        reporter.on_test_result(&report, &mut out).unwrap();
        assert_eq!(
            out,
            "[gw0] PASSED test_a.py::test_passing_function \
             \n[gw0] PASSED test_a.py::test_passing_function "
        );
    }

    #[test]
    fn silent_reports_are_counted() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        let report = TestReport::new(
            TestIdentity::parse("test_a.py::test_x"),
            Phase::Setup,
            Outcome::Passed,
        );
        let classification = reporter.on_test_result(&report, &mut out).unwrap();
        assert!(classification.is_silent());
        assert_eq!(out, "");
        assert_eq!(reporter.stats().count(categories::SILENT), 1);
    }

    #[test]
    fn failure_summary_indexes_and_spacing() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        run_test(&mut reporter, &mut out, "test_a.py::TestClassName::test_zero_is_truthy", Outcome::Failed);
        run_test(&mut reporter, &mut out, "test_a.py::TestClassName::test_passing_function", Outcome::Passed);
        run_test(&mut reporter, &mut out, "test_a.py::test_one_equals_two", Outcome::Failed);
        out.clear();

        reporter
            .on_run_finish_render_failure_summary(TracebackStyle::Short, &mut out)
            .unwrap();
        let trimmed: Vec<&str> = out.trim_start().lines().map(str::trim_end).collect();
        insta::assert_snapshot!(trimmed.join("\n"), @r"
        .  .  .  .  .  .  .  .  .  .  .   FAILURES .  .  .  .  .  .  .  .  .  .  .  .

        1. TestClassName: zero is truthy  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
           Path: test_a.py::TestClassName::test_zero_is_truthy
            def test_zero_is_truthy():
        >       assert 0
        E       assert 0


        2. one equals two  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
           Path: test_a.py::test_one_equals_two
            def test_one_equals_two():
        >       assert 0
        E       assert 0
        ");
        assert!(!reporter.state().is_first_failure());
    }

    #[test]
    fn failure_summary_skipped_without_failures() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        run_test(&mut reporter, &mut out, "test_a.py::test_passing_function", Outcome::Passed);
        out.clear();

        reporter
            .on_run_finish_render_failure_summary(TracebackStyle::Auto, &mut out)
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn failure_summary_disabled_and_line_styles() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        run_test(&mut reporter, &mut out, "test_a.py::test_failing_function", Outcome::Failed);
        out.clear();

        reporter
            .on_run_finish_render_failure_summary(TracebackStyle::No, &mut out)
            .unwrap();
        assert_eq!(out, "");

        reporter
            .on_run_finish_render_failure_summary(TracebackStyle::Line, &mut out)
            .unwrap();
        assert!(!out.contains("1. "), "line style has no titles: {out:?}");
        assert!(out.ends_with("test_a.py::test_failing_function\n"), "output: {out:?}");
    }

    #[test]
    fn teardown_sections_follow_failure_body() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        let identity = TestIdentity::parse("test_a.py::test_failing_function");

        let mut call = TestReport::new(identity.clone(), Phase::Call, Outcome::Failed);
        call.failure = Some(FailureDetail {
            entries: vec!["E       assert 0".to_owned()],
            crash: None,
        });
        reporter.on_test_result(&call, &mut out).unwrap();

        let mut teardown = TestReport::new(identity, Phase::Teardown, Outcome::Passed);
        teardown.sections.push(OutputSection {
            name: "Captured stdout teardown".to_owned(),
            content: "closing connection\n".to_owned(),
        });
        reporter.on_test_result(&teardown, &mut out).unwrap();
        out.clear();

        reporter
            .on_run_finish_render_failure_summary(TracebackStyle::Short, &mut out)
            .unwrap();
        let body = out
            .split_once("   Path: test_a.py::test_failing_function \n")
            .expect("path line is present")
            .1;
        assert!(body.starts_with("E       assert 0\n-"), "body: {body:?}");
        assert!(body.contains(" Captured stdout teardown "));
        assert!(body.ends_with("\nclosing connection\n"), "body: {body:?}");
    }

    #[test]
    fn run_finish_writes_errors_failures_and_stats() {
        let mut reporter = reporter(DisplayMode::Grouped);
        let mut out = String::new();
        reporter
            .on_run_start(&RunStarted::default(), &mut out)
            .unwrap();
        run_test(&mut reporter, &mut out, "test_a.py::test_failing_function", Outcome::Failed);

        let mut setup_error = TestReport::new(
            TestIdentity::parse("test_a.py::test_needs_db"),
            Phase::Setup,
            Outcome::Failed,
        );
        setup_error.failure = Some(FailureDetail {
            entries: vec!["E       fixture 'db' not found".to_owned()],
            crash: None,
        });
        reporter.on_test_result(&setup_error, &mut out).unwrap();
        reporter
            .on_run_finish(Some(Duration::from_millis(120)), &mut out)
            .unwrap();

        let errors = out.find("ERRORS").expect("errors section");
        let failures = out.find("FAILURES").expect("failures section");
        assert!(errors < failures);
        assert!(out.contains("1. needs db (setup error)  . "));
        assert!(out.contains("\n  needs db (ERROR)"));
        assert!(out.trim_end().ends_with(" 1 failed, 1 error in 0.12s ======="));
        assert!(!out.contains("_ _ _ _"));
    }
}
