// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    events::{Phase, TestReport},
    status::{Markup, categories},
};
use crate::identity::TestIdentity;
use indexmap::IndexMap;
use swrite::{SWrite, swrite};

/// Categories shown in the final stats line, in order. Other non-silent categories follow.
const KNOWN_CATEGORIES: &[&str] = &[
    categories::FAILED,
    categories::PASSED,
    categories::SKIPPED,
    categories::ERROR,
];

/// Reports seen during a run, grouped by classification category in the order categories first
/// appeared.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    by_category: IndexMap<String, Vec<TestReport>>,
}

impl RunStats {
    /// Records a report under a category.
    pub fn record(&mut self, category: &str, report: TestReport) {
        self.by_category
            .entry(category.to_owned())
            .or_default()
            .push(report);
    }

    /// Returns the reports in a category, in the order they were recorded.
    pub fn reports(&self, category: &str) -> &[TestReport] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of reports in a category.
    pub fn count(&self, category: &str) -> usize {
        self.reports(category).len()
    }

    /// Returns the teardown reports recorded for a test, across all categories.
    pub fn teardown_reports<'a>(
        &'a self,
        identity: &'a TestIdentity,
    ) -> impl Iterator<Item = &'a TestReport> + 'a {
        self.by_category
            .values()
            .flatten()
            .filter(move |report| report.phase == Phase::Teardown && &report.identity == identity)
    }

    /// Returns true if nothing failed or errored.
    pub fn is_success(&self) -> bool {
        self.count(categories::FAILED) == 0 && self.count(categories::ERROR) == 0
    }

    /// Returns true if at least one report was recorded in a visible category.
    pub fn has_visible_reports(&self) -> bool {
        self.by_category
            .iter()
            .any(|(category, reports)| category != categories::SILENT && !reports.is_empty())
    }

    /// Returns the counts shown in the final stats line, known categories first.
    pub fn summary_counts(&self) -> Vec<(&str, usize)> {
        let known = KNOWN_CATEGORIES
            .iter()
            .map(|category| (*category, self.count(category)));
        let unknown = self
            .by_category
            .iter()
            .filter(|(category, _)| {
                !category.is_empty() && !KNOWN_CATEGORIES.contains(&category.as_str())
            })
            .map(|(category, reports)| (category.as_str(), reports.len()));
        known.chain(unknown).filter(|(_, count)| *count > 0).collect()
    }

    /// Returns the body of the final stats line, e.g. `1 failed, 2 passed`.
    pub fn summary_text(&self) -> String {
        let counts = self.summary_counts();
        if counts.is_empty() {
            return "no tests ran".to_owned();
        }
        let mut out = String::new();
        for (index, (category, count)) in counts.into_iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let noun = if category == categories::ERROR && count != 1 {
                "errors"
            } else {
                category
            };
            swrite!(out, "{count} {noun}");
        }
        out
    }

    /// Returns the markup of the final stats line.
    pub fn summary_markup(&self) -> Markup {
        let has_unknown = self.by_category.keys().any(|category| {
            !category.is_empty() && !KNOWN_CATEGORIES.contains(&category.as_str())
        });
        if !self.is_success() {
            Markup::red()
        } else if has_unknown {
            Markup::yellow()
        } else if self.count(categories::PASSED) > 0 {
            Markup::green()
        } else {
            Markup::yellow()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::events::Outcome;

    fn report(node_id: &str, phase: Phase, outcome: Outcome) -> TestReport {
        TestReport::new(TestIdentity::parse(node_id), phase, outcome)
    }

    #[test]
    fn summary_text_orders_known_categories() {
        let mut stats = RunStats::default();
        stats.record("passed", report("a.py::test_1", Phase::Call, Outcome::Passed));
        stats.record("error", report("a.py::test_2", Phase::Setup, Outcome::Failed));
        stats.record("error", report("a.py::test_3", Phase::Setup, Outcome::Failed));
        stats.record("failed", report("a.py::test_4", Phase::Call, Outcome::Failed));
        stats.record("", report("a.py::test_1", Phase::Setup, Outcome::Passed));

        assert_eq!(stats.summary_text(), "1 failed, 1 passed, 2 errors");
        assert_eq!(stats.summary_markup(), Markup::red());
        assert!(!stats.is_success());
    }

    #[test]
    fn summary_text_without_reports() {
        let stats = RunStats::default();
        assert_eq!(stats.summary_text(), "no tests ran");
        assert_eq!(stats.summary_markup(), Markup::yellow());
        assert!(!stats.has_visible_reports());
    }

    #[test]
    fn custom_categories_are_listed_last() {
        let mut stats = RunStats::default();
        stats.record("positive", report("a.py::test_1", Phase::Call, Outcome::Passed));
        stats.record("passed", report("a.py::test_2", Phase::Call, Outcome::Passed));
        assert_eq!(stats.summary_text(), "1 passed, 1 positive");
        assert_eq!(stats.summary_markup(), Markup::yellow());
    }

    #[test]
    fn teardown_reports_match_identity() {
        let mut stats = RunStats::default();
        stats.record("", report("a.py::test_1", Phase::Teardown, Outcome::Passed));
        stats.record("error", report("a.py::test_1", Phase::Teardown, Outcome::Failed));
        stats.record("", report("a.py::test_2", Phase::Teardown, Outcome::Passed));
        stats.record("", report("a.py::test_1", Phase::Setup, Outcome::Passed));

        let identity = TestIdentity::parse("a.py::test_1");
        assert_eq!(stats.teardown_reports(&identity).count(), 2);
    }
}
