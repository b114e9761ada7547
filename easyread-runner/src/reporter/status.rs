// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of reports into categories, progress markers and status words.
//!
//! Hosts let plugins decide how an outcome is shown. This is modelled by the
//! [`StatusClassifier`] trait: the reporter hands it every report (including passing setup and
//! teardown phases) and renders whatever it returns.

use super::events::{Phase, TestReport};
use owo_colors::Style;
use serde::Deserialize;

/// Well-known classification categories.
pub mod categories {
    /// Passing test bodies.
    pub const PASSED: &str = "passed";
    /// Failing test bodies.
    pub const FAILED: &str = "failed";
    /// Skipped phases.
    pub const SKIPPED: &str = "skipped";
    /// Failing setup or teardown phases.
    pub const ERROR: &str = "error";
    /// Silent reports, typically passing setup and teardown phases.
    pub const SILENT: &str = "";
}

/// A color used by [`Markup`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkupColor {
    /// Green.
    Green,
    /// Red.
    Red,
    /// Yellow.
    Yellow,
}

/// Abstract text styling, resolved to a terminal style only when output is colorized.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Markup {
    /// The foreground color, if any.
    pub color: Option<MarkupColor>,

    /// Whether the text is bold.
    pub bold: bool,
}

impl Markup {
    /// No styling.
    pub const NONE: Self = Self {
        color: None,
        bold: false,
    };

    /// Green text.
    pub const fn green() -> Self {
        Self {
            color: Some(MarkupColor::Green),
            bold: false,
        }
    }

    /// Red text.
    pub const fn red() -> Self {
        Self {
            color: Some(MarkupColor::Red),
            bold: false,
        }
    }

    /// Yellow text.
    pub const fn yellow() -> Self {
        Self {
            color: Some(MarkupColor::Yellow),
            bold: false,
        }
    }

    /// Bold text.
    pub const fn bold() -> Self {
        Self {
            color: None,
            bold: true,
        }
    }

    /// Returns this markup with bold enabled.
    pub const fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Converts this markup into a terminal style.
    pub fn to_style(self) -> Style {
        let mut style = Style::new();
        style = match self.color {
            Some(MarkupColor::Green) => style.green(),
            Some(MarkupColor::Red) => style.red(),
            Some(MarkupColor::Yellow) => style.yellow(),
            None => style,
        };
        if self.bold {
            style = style.bold();
        }
        style
    }
}

/// The word shown for a status, optionally with explicit styling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusWord {
    /// A word styled according to the outcome of the report.
    Plain(String),

    /// A word with explicit styling.
    Styled {
        /// The word.
        text: String,
        /// The styling to apply.
        markup: Markup,
    },
}

impl StatusWord {
    /// Returns the text of this word.
    pub fn text(&self) -> &str {
        match self {
            StatusWord::Plain(text) | StatusWord::Styled { text, .. } => text,
        }
    }

    /// Returns the explicit markup, if any.
    pub fn markup(&self) -> Option<Markup> {
        match self {
            StatusWord::Plain(_) => None,
            StatusWord::Styled { markup, .. } => Some(*markup),
        }
    }
}

/// The result of classifying a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusClassification {
    /// The statistics category the report is counted under.
    pub category: String,

    /// The short progress marker, e.g. `.` or `F`.
    pub marker: String,

    /// The status word, e.g. `PASSED`.
    pub word: StatusWord,
}

impl StatusClassification {
    /// Creates a new classification with a plain word.
    pub fn new(
        category: impl Into<String>,
        marker: impl Into<String>,
        word: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            marker: marker.into(),
            word: StatusWord::Plain(word.into()),
        }
    }

    /// Creates a classification that produces no output.
    pub fn silent() -> Self {
        Self::new(categories::SILENT, "", "")
    }

    /// Returns true if neither a marker nor a word should be shown.
    pub fn is_silent(&self) -> bool {
        self.marker.is_empty() && self.word.text().is_empty()
    }
}

/// Decides how a report is categorized and shown.
pub trait StatusClassifier {
    /// Classifies a report. Called for every phase of every test.
    fn classify(&self, report: &TestReport) -> StatusClassification;
}

impl<T: StatusClassifier + ?Sized> StatusClassifier for Box<T> {
    fn classify(&self, report: &TestReport) -> StatusClassification {
        (**self).classify(report)
    }
}

/// The host's stock classification.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultStatusClassifier;

impl StatusClassifier for DefaultStatusClassifier {
    fn classify(&self, report: &TestReport) -> StatusClassification {
        if report.skipped() {
            return StatusClassification::new(categories::SKIPPED, "s", "SKIPPED");
        }
        match (report.phase, report.passed()) {
            (Phase::Setup | Phase::Teardown, true) => StatusClassification::silent(),
            (Phase::Setup | Phase::Teardown, false) => {
                StatusClassification::new(categories::ERROR, "E", "ERROR")
            }
            (Phase::Call, true) => StatusClassification::new(categories::PASSED, ".", "PASSED"),
            (Phase::Call, false) => StatusClassification::new(categories::FAILED, "F", "FAILED"),
        }
    }
}

/// Replacement words for statuses, keyed by category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatusWordOverrides {
    /// The word for passing tests.
    #[serde(default)]
    pub passed: Option<String>,

    /// The word for failing tests.
    #[serde(default)]
    pub failed: Option<String>,

    /// The word for skipped tests.
    #[serde(default)]
    pub skipped: Option<String>,

    /// The word for setup and teardown errors.
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusWordOverrides {
    /// Returns true if no words are overridden.
    pub fn is_empty(&self) -> bool {
        self.passed.is_none()
            && self.failed.is_none()
            && self.skipped.is_none()
            && self.error.is_none()
    }

    fn word_for(&self, category: &str) -> Option<&str> {
        match category {
            categories::PASSED => self.passed.as_deref(),
            categories::FAILED => self.failed.as_deref(),
            categories::SKIPPED => self.skipped.as_deref(),
            categories::ERROR => self.error.as_deref(),
            _ => None,
        }
    }
}

/// A classifier that replaces the words of another classifier with configured ones.
#[derive(Clone, Debug)]
pub struct ConfiguredStatusClassifier<C> {
    inner: C,
    overrides: StatusWordOverrides,
}

impl<C: StatusClassifier> ConfiguredStatusClassifier<C> {
    /// Wraps `inner`, replacing its words with `overrides`.
    pub fn new(inner: C, overrides: StatusWordOverrides) -> Self {
        Self { inner, overrides }
    }
}

impl<C: StatusClassifier> StatusClassifier for ConfiguredStatusClassifier<C> {
    fn classify(&self, report: &TestReport) -> StatusClassification {
        let mut classification = self.inner.classify(report);
        if classification.is_silent() {
            return classification;
        }
        if let Some(word) = self.overrides.word_for(&classification.category) {
            classification.word = match classification.word {
                StatusWord::Plain(_) => StatusWord::Plain(word.to_owned()),
                StatusWord::Styled { markup, .. } => StatusWord::Styled {
                    text: word.to_owned(),
                    markup,
                },
            };
        }
        classification
    }
}
