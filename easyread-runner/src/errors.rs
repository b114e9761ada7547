// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by easyread.

use camino::{FromPathBufError, Utf8PathBuf};
use std::io;
use thiserror::Error;

/// An error that occurred while reading or decoding test events.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseEventError {
    /// An error occurred while reading from the input.
    #[error("error reading events from {input}")]
    Read {
        /// The name of the input, e.g. a path or `<stdin>`.
        input: String,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// A line of the input couldn't be decoded as an event.
    #[error("{input}:{line}: invalid event")]
    Decode {
        /// The name of the input.
        input: String,

        /// The 1-based line number.
        line: usize,

        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },
}

/// An error occurred while writing an event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[source] io::Error),
}

/// An error that occurred while loading user configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserConfigError {
    /// A user config file was explicitly requested but doesn't exist.
    #[error("user config file not found at {path}")]
    FileNotFound {
        /// The path that was requested.
        path: Utf8PathBuf,
    },

    /// The user config file couldn't be read.
    #[error("failed to read user config at {path}")]
    Read {
        /// The path to the config file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The user config file couldn't be parsed.
    #[error("failed to parse user config at {path}")]
    Parse {
        /// The path to the config file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: toml::de::Error,
    },

    /// The user config directory isn't valid UTF-8.
    #[error("user config path is not valid UTF-8")]
    NonUtf8Path {
        /// The underlying error.
        #[source]
        error: FromPathBufError,
    },
}
