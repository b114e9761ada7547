// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pieces of output shared by both reporters: the session header, failure bodies and the final
//! stats line.

use super::{
    TracebackStyle,
    formatters::format_elapsed,
    terminal::TerminalWriter,
};
use crate::{
    identity::TestIdentity,
    reporter::{
        events::{RunStarted, TestReport},
        stats::RunStats,
        status::Markup,
    },
    write_str::WriteStr,
};
use std::{io, time::Duration};

/// The separator the host draws between traceback entries.
pub(super) const HOST_ENTRY_SEPARATOR: &str = "_ ";

/// The separator used between traceback entries in easy output.
pub(super) const EASY_ENTRY_SEPARATOR: &str = " ";

/// Prefix of traceback lines that carry the error itself.
const ERROR_LINE_PREFIX: &str = "E ";

pub(super) fn write_session_header(
    terminal: &mut TerminalWriter,
    out: &mut dyn WriteStr,
    run: &RunStarted,
) -> io::Result<()> {
    terminal.write_sep(out, "=", Some("test session starts"), Markup::bold())?;
    if let Some(root) = &run.root {
        terminal.write_line(out, &format!("rootdir: {root}"), Markup::NONE)?;
    }
    if let Some(count) = run.test_count {
        let noun = if count == 1 { "item" } else { "items" };
        terminal.write_line(out, &format!("collected {count} {noun}"), Markup::bold())?;
    }
    Ok(())
}

/// Writes the failure details and captured output of a report.
pub(super) fn write_report_body(
    terminal: &mut TerminalWriter,
    out: &mut dyn WriteStr,
    report: &TestReport,
    style: TracebackStyle,
    entry_separator: &str,
) -> io::Result<()> {
    if let Some(failure) = &report.failure {
        let count = failure.entries.len();
        for (index, entry) in failure.entries.iter().enumerate() {
            if style.spaces_entries() {
                terminal.line(out, "", Markup::NONE)?;
            }
            for line in entry.trim_end_matches('\n').lines() {
                let markup = if line.starts_with(ERROR_LINE_PREFIX) {
                    Markup::red().with_bold()
                } else {
                    Markup::NONE
                };
                terminal.line(out, line, markup)?;
            }
            if style.spaces_entries() && index + 1 < count {
                terminal.sep(out, entry_separator, None, Markup::NONE)?;
            }
        }
        if count == 0 {
            if let Some(crash) = &failure.crash {
                terminal.line(out, &crash.to_string(), Markup::NONE)?;
            }
        }
    }

    for section in &report.sections {
        write_section(terminal, out, &section.name, &section.content)?;
    }
    Ok(())
}

/// Writes the teardown output recorded for a test.
pub(super) fn write_teardown_sections(
    terminal: &mut TerminalWriter,
    out: &mut dyn WriteStr,
    stats: &RunStats,
    identity: &TestIdentity,
) -> io::Result<()> {
    for report in stats.teardown_reports(identity) {
        for section in &report.sections {
            if section.name.contains("teardown") {
                write_section(terminal, out, &section.name, &section.content)?;
            }
        }
    }
    Ok(())
}

fn write_section(
    terminal: &mut TerminalWriter,
    out: &mut dyn WriteStr,
    name: &str,
    content: &str,
) -> io::Result<()> {
    terminal.sep(out, "-", Some(name), Markup::NONE)?;
    let content = content.strip_suffix('\n').unwrap_or(content);
    terminal.line(out, content, Markup::NONE)
}

/// Writes the closing line, e.g. `1 failed, 1 passed in 0.12s`.
pub(super) fn write_stats_line(
    terminal: &mut TerminalWriter,
    out: &mut dyn WriteStr,
    stats: &RunStats,
    elapsed: Option<Duration>,
) -> io::Result<()> {
    let mut text = stats.summary_text();
    if let Some(elapsed) = elapsed {
        text.push_str(" in ");
        text.push_str(&format_elapsed(elapsed));
    }
    terminal.write_sep(out, "=", Some(&text), stats.summary_markup().with_bold())
}
