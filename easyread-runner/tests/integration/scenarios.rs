// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{easy, render};
use easyread_runner::{
    input::EventFormat,
    reporter::{ActiveReporter, DisplayMode, ReporterBuilder, TracebackStyle},
};
use pretty_assertions::assert_eq;

#[test]
fn single_file_is_grouped_under_one_header() {
    let rendered = render("scenario-a.jsonl", EventFormat::Native, easy);
    assert_eq!(rendered.active, ActiveReporter::Easy);
    assert!(!rendered.is_success);

    let output = &rendered.output;
    assert_eq!(output.matches("\ntest_a.py \n").count(), 1);
    assert!(output.contains("\ntest_a.py \n  failing function (FAILED)\n  passing function (PASSED)\n"));

    insta::assert_snapshot!(rendered.trimmed(), @r"
    ============================= test session starts ==============================
    rootdir: /project
    collected 2 items

    test_a.py
      failing function (FAILED)
      passing function (PASSED)

    .  .  .  .  .  .  .  .  .  .  .   FAILURES .  .  .  .  .  .  .  .  .  .  .  .

    1. failing function  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
       Path: test_a.py::test_failing_function

        def test_failing_function():
    >       assert 0
    E       assert 0
    ========================= 1 failed, 1 passed in 0.12s ==========================
    ");
}

#[test]
fn consecutive_files_are_separated_by_one_blank_line() {
    let rendered = render("scenario-b.jsonl", EventFormat::Native, easy);
    let output = &rendered.output;

    let block = "  failing function (FAILED)\n  passing function (PASSED)";
    assert!(output.contains(&format!("\ntest_a.py \n{block}\n\ntest_b.py \n{block}\n")));
    assert!(!output.contains("(PASSED)\n\n\ntest_b.py"));
    assert!(output.contains("2 failed, 2 passed in 0.25s"));
}

#[test]
fn failure_summary_is_indexed_in_completion_order() {
    let rendered = render("scenario-c.jsonl", EventFormat::Native, easy);
    let trimmed = rendered.trimmed();
    assert!(trimmed.contains(
        "\ntest_c.py\n  TestClassName\n    zero is truthy (FAILED)\n    one is truthy (PASSED)\n  one equals two (FAILED)\n\n.  .  ."
    ));

    let summary = &trimmed[trimmed.find("1. TestClassName").expect("failure summary is written")..];
    insta::assert_snapshot!(summary, @r"
    1. TestClassName: zero is truthy  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
       Path: test_c.py::TestClassName::test_zero_is_truthy

        def test_zero_is_truthy(self):
    >       assert 0
    E       assert 0


    2. one equals two  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .  .
       Path: test_c.py::test_one_equals_two

        def test_one_equals_two():
    >       assert 1 == 2
    E       assert 1 == 2
    ========================= 2 failed, 1 passed in 0.05s ==========================
    ");
}

#[test]
fn non_assertion_errors_are_ordinary_failures() {
    let rendered = render("scenario-d.jsonl", EventFormat::Native, easy);
    let output = &rendered.output;

    assert!(output.contains("\n  rejects non integer (FAILED)\n"));
    assert!(output.contains("\n1. rejects non integer  .  ."));
    assert!(output.contains("   Path: test_d.py::test_rejects_non_integer \n"));
    assert!(output.contains("\nE           logic.NotAnIntegerError: two\n"));
    assert!(output.contains(" 1 failed, 1 passed in 0.03s "));
    assert!(!output.contains("_ _ _ _"), "easy output uses plain entry separators");
}

#[test]
fn default_reporter_is_used_without_easy() {
    let rendered = render("scenario-d.jsonl", EventFormat::Native, |_| {});
    assert_eq!(rendered.active, ActiveReporter::Default);

    let output = &rendered.output;
    assert!(output.contains("\ntest_d.py F.\n"));
    assert!(output.contains(" FAILURES "));
    assert!(output.contains(" test_rejects_non_integer "));
    assert!(output.contains("_ _ _ _"), "host entry separator is kept");
    assert!(!output.contains("(FAILED)"));
}

#[test]
fn worker_processes_keep_the_default_reporter() {
    let rendered = render("scenario-a.jsonl", EventFormat::Native, |builder| {
        builder.set_easy(true).set_worker(true);
    });
    assert_eq!(rendered.active, ActiveReporter::Default);
    assert!(rendered.output.contains("\ntest_a.py F.\n"));
}

#[test]
fn worker_tagged_reports_are_flat_lines() {
    let rendered = render("workers.jsonl", EventFormat::Native, easy);
    let output = &rendered.output;
    assert!(output.contains(
        "\n[gw0] PASSED test_a.py::test_passing_function \n[gw1] FAILED test_a.py::test_failing_function \n"
    ));
    assert!(output.contains("\n1. failing function  .  ."));
}

#[test]
fn setup_errors_get_their_own_section() {
    let rendered = render("setup-error.jsonl", EventFormat::Native, easy);
    let output = &rendered.output;

    assert!(output.contains("\n  needs database (ERROR)\n  cleans up (PASSED)\n  leaks (SKIPPED)\n"));
    assert!(output.contains(".   ERRORS ."));
    assert!(!output.contains("FAILURES"));
    assert!(output.contains("\n1. needs database (setup error)  .  ."));
    assert!(output.contains("\nE       ConnectionError: refused\n"));
    assert!(output.contains(" 1 passed, 1 skipped, 1 error in 0.50s "));
}

#[test]
fn traceback_style_no_skips_summaries() {
    let rendered = render("scenario-c.jsonl", EventFormat::Native, |builder| {
        builder.set_easy(true).set_traceback_style(TracebackStyle::No);
    });
    assert!(!rendered.output.contains("FAILURES"));
    assert!(rendered.output.contains(" 2 failed, 1 passed in 0.05s "));
}

#[test]
fn traceback_style_line_writes_crash_lines() {
    let rendered = render("scenario-c.jsonl", EventFormat::Native, |builder| {
        builder.set_easy(true).set_traceback_style(TracebackStyle::Line);
    });
    let output = &rendered.output;
    assert!(output.contains("\ntest_c.py:3: assert 0\ntest_c.py:10: assert 1 == 2\n"));
    assert!(!output.contains("1. TestClassName"));
}

#[test]
fn long_mode_shows_node_ids() {
    let rendered = render("scenario-a.jsonl", EventFormat::Native, |builder| {
        builder.set_easy(true).set_display_mode(DisplayMode::Long);
    });
    let output = &rendered.output;
    assert!(output.contains("\ntest_a.py::test_failing_function \n  failing function (FAILED)"));
    assert!(!output.contains("\ntest_a.py \n"));
}

#[test]
fn quiet_mode_has_no_headers() {
    let rendered = render("scenario-b.jsonl", EventFormat::Native, |builder| {
        builder.set_easy(true).set_display_mode(DisplayMode::Quiet);
    });
    let output = &rendered.output;
    assert!(!output.contains("\ntest_a.py \n"));
    assert!(output.contains("\n  failing function (FAILED)\n  passing function (PASSED)\n"));
}

#[test]
fn libtest_output_is_grouped_by_module() {
    let rendered = render("libtest.jsonl", EventFormat::LibtestJson, easy);
    let output = &rendered.output;

    assert!(output.contains("collected 3 items\n"));
    assert!(output.contains(
        "\nlibtest \n  parser \n    parses empty input (PASSED)\n    rejects garbage (FAILED)\n  smoke (SKIPPED)\n"
    ));
    assert!(output.contains("\n1. parser: rejects garbage  .  ."));
    assert!(output.contains("   Path: libtest::parser::tests::rejects_garbage \n"));
    assert!(output.contains("\nexpected an error\n"));
    assert!(output.contains(" 1 failed, 1 passed, 1 skipped in 0.00s "));
}

#[test]
fn narrow_widths_fall_back_to_default() {
    let narrow = render("scenario-a.jsonl", EventFormat::Native, |builder: &mut ReporterBuilder| {
        builder.set_easy(true).set_width(10);
    });
    let default = render("scenario-a.jsonl", EventFormat::Native, easy);
    assert_eq!(narrow.output, default.output);
}
