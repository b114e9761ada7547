// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! How much per-test detail is shown, and how failures are rendered.

use serde::Deserialize;
use std::fmt;

/// How tests are laid out while the run is in progress.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// One fully-qualified location line per test.
    Long,

    /// Tests grouped under file and class headers.
    #[default]
    Grouped,

    /// No headers at all.
    Quiet,
}

impl DisplayMode {
    /// Returns the display mode for a verbosity level, as counted from `-v` and `-q` flags.
    pub fn from_verbosity(verbosity: i8) -> Self {
        match verbosity {
            v if v > 0 => DisplayMode::Long,
            0 => DisplayMode::Grouped,
            _ => DisplayMode::Quiet,
        }
    }
}

/// How failure details are rendered in the summary.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TracebackStyle {
    /// Long tracebacks, shortened where the host thinks it helps.
    #[default]
    Auto,

    /// Full tracebacks.
    Long,

    /// Short tracebacks.
    Short,

    /// A single crash line per failure.
    Line,

    /// Tracebacks as the host language prints them natively.
    Native,

    /// No failure summary at all.
    No,
}

impl TracebackStyle {
    /// Returns true if every traceback entry is preceded by a blank line.
    pub(super) fn spaces_entries(self) -> bool {
        matches!(self, TracebackStyle::Auto | TracebackStyle::Long)
    }
}

impl fmt::Display for TracebackStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TracebackStyle::Auto => "auto",
            TracebackStyle::Long => "long",
            TracebackStyle::Short => "short",
            TracebackStyle::Line => "line",
            TracebackStyle::Native => "native",
            TracebackStyle::No => "no",
        };
        f.write_str(s)
    }
}
