// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layout invariants of the easy reporter over generated runs.

use crate::fixtures::{easy, render_events};
use easyread_runner::{
    identity::TestIdentity,
    reporter::{CrashLine, FailureDetail, Outcome, Phase, RunStarted, TestEvent, TestReport},
};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
struct GeneratedTest {
    file: usize,
    class: Option<usize>,
    outcome: Outcome,
}

fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        3 => Just(Outcome::Passed),
        2 => Just(Outcome::Failed),
        1 => Just(Outcome::Skipped),
    ]
}

fn run_strategy() -> impl Strategy<Value = Vec<GeneratedTest>> {
    prop::collection::vec(
        (0..3usize, prop::option::of(0..2usize), outcome_strategy()),
        0..24,
    )
    .prop_map(|mut tests| {
        // Hosts run files one after the other.
        tests.sort_by_key(|(file, _, _)| *file);
        tests
            .into_iter()
            .map(|(file, class, outcome)| GeneratedTest {
                file,
                class,
                outcome,
            })
            .collect()
    })
}

fn identity(index: usize, test: &GeneratedTest) -> TestIdentity {
    let file = format!("test_{}.py", test.file);
    let containers = test.class.map(|class| format!("TestGroup{class}"));
    TestIdentity::new(file, containers, format!("test_case_{index}"))
}

fn events(tests: &[GeneratedTest]) -> Vec<TestEvent> {
    let mut events = vec![TestEvent::RunStarted(RunStarted {
        test_count: Some(tests.len()),
        ..RunStarted::default()
    })];
    for (index, test) in tests.iter().enumerate() {
        let identity = identity(index, test);
        events.push(TestEvent::TestStarted {
            identity: identity.clone(),
            location: None,
        });
        let mut report = TestReport::new(identity, Phase::Call, test.outcome);
        if test.outcome == Outcome::Failed {
            report.failure = Some(FailureDetail {
                entries: vec![">       assert 0\nE       assert 0".to_owned()],
                crash: Some(CrashLine {
                    path: format!("test_{}.py", test.file).into(),
                    line: Some(1),
                    message: "assert 0".to_owned(),
                }),
            });
        }
        events.push(TestEvent::TestReport(Box::new(report)));
    }
    events.push(TestEvent::RunFinished { elapsed: None });
    events
}

fn word(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Passed => "PASSED",
        Outcome::Failed => "FAILED",
        Outcome::Skipped => "SKIPPED",
    }
}

#[test_strategy::proptest]
fn grouped_layout_invariants(#[strategy(run_strategy())] tests: Vec<GeneratedTest>) {
    let output = render_events(events(&tests), easy).output;
    let failed: Vec<usize> = tests
        .iter()
        .enumerate()
        .filter(|(_, test)| test.outcome == Outcome::Failed)
        .map(|(index, _)| index)
        .collect();

    // The summary exists exactly when something failed.
    prop_assert_eq!(output.contains(" FAILURES "), !failed.is_empty());
    prop_assert!(!output.contains("_ _ _ _"));

    // Headers appear at most once per file, and class headers once per (file, class).
    let mut files = BTreeSet::new();
    let mut classes = BTreeSet::new();
    let mut current_file = None;
    for line in output.lines() {
        if let Some(file) = line.strip_suffix(".py ") {
            prop_assert!(files.insert(file.to_owned()), "file header repeated: {line:?}");
            current_file = Some(file.to_owned());
        } else if let Some(class) = line.strip_prefix("  TestGroup") {
            let key = (current_file.clone(), class.to_owned());
            prop_assert!(classes.insert(key), "class header repeated: {line:?}");
        }
    }

    // Results are indented by four spaces in a class and two otherwise.
    for (index, test) in tests.iter().enumerate() {
        let indent = if test.class.is_some() { "    " } else { "  " };
        let result_line = format!("\n{indent}case {index} ({})", word(test.outcome));
        prop_assert!(output.contains(&result_line), "missing {result_line:?}");
    }

    // Failure titles are numbered from 1 in completion order.
    let mut search_from = 0;
    for (position, index) in failed.iter().enumerate() {
        let title = format!("\n{}. ", position + 1);
        let found = output[search_from..].find(&title);
        prop_assert!(found.is_some(), "missing failure title {}", position + 1);
        search_from += found.unwrap_or_default() + title.len();
        let path = format!("   Path: {} \n", identity(*index, &tests[*index]).node_id());
        prop_assert!(output[search_from..].contains(&path));
    }
}
