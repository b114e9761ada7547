// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-specific configuration for easyread.
//!
//! User config stores per-user display preferences, like whether to use the easy reporter and
//! which words to show for statuses.
//!
//! ## Config file location
//!
//! The user config file is read from `$XDG_CONFIG_HOME/easyread/config.toml`, falling back to
//! `~/.config/easyread/config.toml` if `XDG_CONFIG_HOME` is unset. The same path is used on
//! every platform.
//!
//! ## Configuration hierarchy
//!
//! Settings are resolved in the following order (highest priority first):
//!
//! 1. CLI arguments (e.g., `--tb=line`)
//! 2. Environment variables (e.g., `EASYREAD_TB=line`)
//! 3. User config (`[ui]` section)
//! 4. Built-in defaults
//!
//! This module handles the last two. The CLI layers arguments and environment variables on top.

mod discovery;
pub mod elements;
mod imp;

pub use discovery::*;
pub use imp::*;
