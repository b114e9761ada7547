// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovery of user config file location.

use crate::errors::UserConfigError;
use camino::Utf8PathBuf;
use etcetera::{BaseStrategy, HomeDirError, base_strategy::Xdg};

/// The directory under the config dir that holds easyread's files.
const CONFIG_DIR_NAME: &str = "easyread";

/// The name of the user config file.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the path to the user config file, or `None` if the home directory can't be found.
///
/// This is `$XDG_CONFIG_HOME/easyread/config.toml`, or `~/.config/easyread/config.toml` if
/// `XDG_CONFIG_HOME` is unset. The file may not exist.
pub fn user_config_path() -> Result<Option<Utf8PathBuf>, UserConfigError> {
    let strategy = match Xdg::new() {
        Ok(s) => s,
        Err(HomeDirError) => return Ok(None),
    };

    let config_path = strategy
        .config_dir()
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);

    Utf8PathBuf::try_from(config_path)
        .map(Some)
        .map_err(|error| UserConfigError::NonUtf8Path { error })
}
