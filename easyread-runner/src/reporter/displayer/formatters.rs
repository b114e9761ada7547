// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    identity::TestIdentity,
    reporter::events::{Location, TestReport},
};
use camino::{Utf8Path, Utf8PathBuf};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Returns a full-width separator line, with `title` centered in it if present.
///
/// The fill is `sepchar` repeated on both sides of the title. A trailing copy of the
/// non-whitespace part of `sepchar` is appended if it still fits.
pub(super) fn sep_line(sepchar: &str, title: Option<&str>, width: usize) -> String {
    let sep_width = sepchar.width().max(1);
    let mut line = match title {
        Some(title) => {
            let n = (width.saturating_sub(title.width() + 2) / (2 * sep_width)).max(1);
            let fill = sepchar.repeat(n);
            format!("{fill} {title} {fill}")
        }
        None => sepchar.repeat(width / sep_width),
    };
    close_line(&mut line, sepchar, width);
    line
}

/// Returns a separator line with `title` at the start, followed by `sepchar` fill up to `width`.
pub(super) fn ljust_sep_line(sepchar: &str, title: &str, width: usize) -> String {
    let sep_width = sepchar.width().max(1);
    let n = width.saturating_sub(title.width() + 2) / sep_width;
    let mut line = format!("{title} {}", sepchar.repeat(n));
    close_line(&mut line, sepchar, width);
    line
}

fn close_line(line: &mut String, sepchar: &str, width: usize) {
    let closer = sepchar.trim_end();
    if line.width() + closer.width() <= width {
        line.push_str(closer);
    }
}

/// Returns the line identifying a test in long-form and worker-tagged output, including its
/// trailing space.
///
/// If the node id ends with the location's domain, that suffix is rewritten from the domain,
/// with dots before any parameter brackets turned into `::`. A definition file that differs
/// from the node id's file is appended as ` <- file`.
pub(super) fn location_line(identity: &TestIdentity, location: Option<&Location>) -> String {
    let node_id = identity.node_id();
    let Some(location) = location else {
        return format!("{node_id} ");
    };

    let mut line = match location.domain.as_deref() {
        Some(domain) if !domain.is_empty() && node_id.ends_with(domain) => {
            let (name, params) = match domain.split_once('[') {
                Some((name, params)) => (name, Some(params)),
                None => (domain, None),
            };
            let mut line = node_id[..node_id.len() - domain.len()].to_owned();
            line.push_str(&name.replace('.', "::"));
            if let Some(params) = params {
                line.push('[');
                line.push_str(params);
            }
            line
        }
        _ => node_id.to_owned(),
    };
    if !location.file.as_str().is_empty() && location.file.as_path() != identity.file() {
        line.push_str(" <- ");
        line.push_str(location.file.as_str());
    }
    line.push(' ');
    line
}

/// Returns the path to show for a file header.
///
/// With both a root and a working directory, the file is resolved against the root and shown
/// relative to the working directory. Otherwise it's shown as given.
pub(super) fn display_path(
    file: &Utf8Path,
    root: Option<&Utf8Path>,
    cwd: Option<&Utf8Path>,
) -> Utf8PathBuf {
    match (root, cwd) {
        (Some(root), Some(cwd)) => {
            let absolute = root.join(file);
            pathdiff::diff_utf8_paths(&absolute, cwd).unwrap_or(absolute)
        }
        (Some(root), None) => root.join(file),
        _ => file.to_owned(),
    }
}

/// Returns the headline used for a report in the stock failure and error summaries.
pub(super) fn failure_headline(report: &TestReport) -> String {
    if let Some(domain) = report
        .location
        .as_ref()
        .and_then(|location| location.domain.as_deref())
    {
        return domain.to_owned();
    }
    let identity = &report.identity;
    if identity.node_id().is_empty() {
        return "test session".to_owned();
    }
    let mut headline = identity.containers().join(".");
    if !headline.is_empty() {
        headline.push('.');
    }
    headline.push_str(identity.name());
    headline
}

/// Formats the elapsed time of a run, e.g. `0.12s`.
pub(super) fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}
