// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    events::{Outcome, TestReport},
    status::{Markup, StatusWord},
};
use owo_colors::Style;

#[derive(Debug, Default, Clone)]
pub(super) struct Styles {
    pub(super) is_colorized: bool,
}

impl Styles {
    pub(super) fn colorize(&mut self) {
        self.is_colorized = true;
    }

    /// Resolves abstract markup to a terminal style, or to no style if output isn't colorized.
    pub(super) fn resolve(&self, markup: Markup) -> Style {
        if self.is_colorized {
            markup.to_style()
        } else {
            Style::new()
        }
    }
}

/// Returns the markup for a status word: its own styling if it has any, otherwise a color
/// derived from the report's outcome.
pub(super) fn word_markup(word: &StatusWord, report: &TestReport) -> Markup {
    word.markup().unwrap_or(match report.outcome {
        Outcome::Passed => Markup::green(),
        Outcome::Failed => Markup::red(),
        Outcome::Skipped => Markup::yellow(),
    })
}
