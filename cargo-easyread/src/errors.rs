// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use easyread_metadata::EasyreadExitCode;
use easyread_runner::errors::{ParseEventError, UserConfigError, WriteEventError};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::{error, warn};

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are mostly placeholders. Errors are meant to be printed with
// display_to_stderr, which colorizes them.

/// An expected failure of `cargo easyread`, with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("user config error")]
    UserConfigError {
        #[from]
        err: UserConfigError,
    },
    #[error("failed to open input")]
    InputOpenError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to parse input")]
    ParseEventError {
        #[from]
        err: ParseEventError,
    },
    #[error("writing event failed")]
    WriteEventError {
        #[from]
        err: WriteEventError,
    },
    #[error("test run failed")]
    TestRunFailed,
    #[error("no tests were run")]
    NoTestsRun,
}

impl ExpectedError {
    pub(crate) fn input_open_error(path: Utf8PathBuf, err: std::io::Error) -> Self {
        Self::InputOpenError { path, err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::UserConfigError { .. } | Self::InputOpenError { .. } => {
                EasyreadExitCode::SETUP_ERROR
            }
            Self::ParseEventError { .. } => EasyreadExitCode::INPUT_PARSE_FAILED,
            Self::WriteEventError { .. } => EasyreadExitCode::WRITE_OUTPUT_ERROR,
            Self::TestRunFailed => EasyreadExitCode::TEST_RUN_FAILED,
            Self::NoTestsRun => EasyreadExitCode::NO_TESTS_RUN,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::UserConfigError { err } => {
                error!("{err}");
                err.source()
            }
            Self::InputOpenError { path, err } => {
                error!("failed to open input `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::ParseEventError { err } => {
                error!("{err}");
                err.source()
            }
            Self::WriteEventError { err } => {
                error!("failed to write event to output");
                Some(err as &dyn Error)
            }
            Self::TestRunFailed => {
                error!("test run failed");
                None
            }
            Self::NoTestsRun => {
                warn!("no tests were run");
                None
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
