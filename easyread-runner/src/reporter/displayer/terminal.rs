// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A line-oriented terminal writer shared by the reporters.
//!
//! The writer remembers what the currently open line started with (the *marker*). That's what
//! lets consecutive writes with the same prefix continue a line instead of starting a new one.

use super::formatters::{ljust_sep_line, sep_line};
use crate::{
    reporter::{helpers::Styles, status::Markup},
    write_str::WriteStr,
};
use owo_colors::OwoColorize;
use std::io;

/// What the currently open output line started with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum PathMarker {
    /// No line is open.
    #[default]
    None,

    /// A line is open and began with this prefix.
    Prefix(String),

    /// A line is open but matches no prefix, so the next prefixed write starts a new line.
    Detached,
}

impl PathMarker {
    fn is_open(&self) -> bool {
        match self {
            PathMarker::None => false,
            PathMarker::Prefix(prefix) => !prefix.is_empty(),
            PathMarker::Detached => true,
        }
    }

    fn is_prefix(&self, prefix: &str) -> bool {
        matches!(self, PathMarker::Prefix(current) if current == prefix)
    }
}

#[derive(Debug)]
pub(super) struct TerminalWriter {
    marker: PathMarker,
    width: usize,
    styles: Styles,
}

impl TerminalWriter {
    pub(super) fn new(width: usize, styles: Styles) -> Self {
        Self {
            marker: PathMarker::None,
            width,
            styles,
        }
    }

    #[cfg(test)]
    pub(super) fn marker(&self) -> &PathMarker {
        &self.marker
    }

    /// Forgets the open line without writing anything.
    pub(super) fn reset(&mut self) {
        self.marker = PathMarker::None;
    }

    /// Marks the open line as matching no prefix.
    pub(super) fn detach(&mut self) {
        self.marker = PathMarker::Detached;
    }

    /// Writes text with the given markup. Doesn't affect the marker.
    pub(super) fn write(
        &mut self,
        out: &mut dyn WriteStr,
        text: &str,
        markup: Markup,
    ) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if markup == Markup::NONE || !self.styles.is_colorized {
            out.write_str(text)
        } else {
            write!(out, "{}", text.style(self.styles.resolve(markup)))
        }
    }

    /// Writes text followed by a newline. Doesn't affect the marker.
    pub(super) fn line(
        &mut self,
        out: &mut dyn WriteStr,
        text: &str,
        markup: Markup,
    ) -> io::Result<()> {
        self.write(out, text, markup)?;
        out.write_str("\n")
    }

    /// Ends the open line, if any.
    pub(super) fn ensure_newline(&mut self, out: &mut dyn WriteStr) -> io::Result<()> {
        if self.marker.is_open() {
            out.write_str("\n")?;
        }
        self.marker = PathMarker::None;
        Ok(())
    }

    /// Writes a full line, ending the open line first.
    pub(super) fn write_line(
        &mut self,
        out: &mut dyn WriteStr,
        text: &str,
        markup: Markup,
    ) -> io::Result<()> {
        self.ensure_newline(out)?;
        self.line(out, text, markup)
    }

    /// Writes a separator line, ending the open line first.
    pub(super) fn write_sep(
        &mut self,
        out: &mut dyn WriteStr,
        sepchar: &str,
        title: Option<&str>,
        markup: Markup,
    ) -> io::Result<()> {
        self.ensure_newline(out)?;
        self.sep(out, sepchar, title, markup)
    }

    /// Writes a separator line without touching the open line.
    pub(super) fn sep(
        &mut self,
        out: &mut dyn WriteStr,
        sepchar: &str,
        title: Option<&str>,
        markup: Markup,
    ) -> io::Result<()> {
        let line = sep_line(sepchar, title, self.width);
        self.line(out, &line, markup)
    }

    /// Writes a separator line with the title on the left, after a line break.
    pub(super) fn ljust_sep(
        &mut self,
        out: &mut dyn WriteStr,
        sepchar: &str,
        title: &str,
        markup: Markup,
    ) -> io::Result<()> {
        out.write_str("\n")?;
        let line = ljust_sep_line(sepchar, title, self.width);
        self.line(out, &line, markup)
    }

    /// Starts a new line with `prefix` unless the open line already began with it, then appends
    /// `extra`.
    ///
    /// Once `extra` has been written the line no longer matches any prefix.
    pub(super) fn write_ensure_prefix(
        &mut self,
        out: &mut dyn WriteStr,
        prefix: &str,
        extra: &str,
        markup: Markup,
    ) -> io::Result<()> {
        if !self.marker.is_prefix(prefix) {
            out.write_str("\n")?;
            self.marker = PathMarker::Prefix(prefix.to_owned());
            self.write(out, prefix, markup)?;
        }
        if !extra.is_empty() {
            self.write(out, extra, markup)?;
            self.marker = PathMarker::Detached;
        }
        Ok(())
    }

    /// Starts a new line headed by `path` (plus a trailing space) unless the open line already
    /// is, then appends `result` unstyled.
    pub(super) fn write_fspath_result(
        &mut self,
        out: &mut dyn WriteStr,
        path: &str,
        result: &str,
        markup: Markup,
    ) -> io::Result<()> {
        if !self.marker.is_prefix(path) {
            self.marker = PathMarker::Prefix(path.to_owned());
            out.write_str("\n")?;
            self.write(out, &format!("{path} "), markup)?;
        }
        self.write(out, result, Markup::NONE)
    }
}
