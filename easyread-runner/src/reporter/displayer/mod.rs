// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The displayers for human-friendly output.

mod default;
mod display_mode;
mod easy;
mod formatters;
mod summary;
mod terminal;

use super::helpers::Styles;
use crate::console::DEFAULT_TERMINAL_WIDTH;
use camino::Utf8PathBuf;
pub use default::DefaultReporter;
pub use display_mode::*;
pub use easy::{EasyReporter, RenderState};

/// Settings shared by both displayers.
#[derive(Clone, Debug)]
pub struct DisplaySettings {
    /// How tests are laid out while the run is in progress.
    pub display_mode: DisplayMode,

    /// How failure details are rendered.
    pub traceback_style: TracebackStyle,

    /// The width of the terminal, in columns.
    pub width: usize,

    /// Whether to colorize output.
    pub colorize: bool,

    /// The directory node ids are relative to. If unset, the root announced by the run is used.
    pub root: Option<Utf8PathBuf>,

    /// The directory file headers are shown relative to.
    pub cwd: Option<Utf8PathBuf>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::default(),
            traceback_style: TracebackStyle::default(),
            width: DEFAULT_TERMINAL_WIDTH,
            colorize: false,
            root: None,
            cwd: None,
        }
    }
}

impl DisplaySettings {
    fn styles(&self) -> Styles {
        let mut styles = Styles::default();
        if self.colorize {
            styles.colorize();
        }
        styles
    }
}
