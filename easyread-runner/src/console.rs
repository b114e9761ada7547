// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal queries.

use tracing::debug;

/// The width used when the terminal width can't be determined.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Widths narrower than this are considered bogus and replaced with the default.
const MIN_TERMINAL_WIDTH: usize = 40;

/// Widths are clamped to this.
const MAX_TERMINAL_WIDTH: usize = u16::MAX as usize;

/// Returns the width of the attached terminal.
///
/// Tries the terminal itself, then the `COLUMNS` environment variable, then falls back to
/// [`DEFAULT_TERMINAL_WIDTH`].
pub fn terminal_width() -> usize {
    let width = match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => usize::from(columns),
        Ok(_) | Err(_) => {
            let columns = std::env::var("COLUMNS").ok();
            debug!("terminal size unavailable, COLUMNS is {columns:?}");
            columns
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_TERMINAL_WIDTH)
        }
    };
    sanitize_width(width)
}

pub(crate) fn sanitize_width(width: usize) -> usize {
    if width < MIN_TERMINAL_WIDTH {
        DEFAULT_TERMINAL_WIDTH
    } else {
        width.min(MAX_TERMINAL_WIDTH)
    }
}
