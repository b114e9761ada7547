// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI-related user configuration.

use crate::reporter::{DisplayMode, StatusWordOverrides, TracebackStyle};
use serde::Deserialize;

/// UI-related configuration (deserialized form).
///
/// All fields are optional; unspecified fields use the defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(in crate::user_config) struct DeserializedUiConfig {
    /// Whether to use the easy reporter.
    pub(in crate::user_config) easy: Option<bool>,

    /// How tests are laid out while the run is in progress.
    pub(in crate::user_config) display: Option<DisplayMode>,

    /// How failure details are rendered.
    pub(in crate::user_config) traceback_style: Option<TracebackStyle>,

    /// Replacement status words. Each word is resolved separately.
    #[serde(default)]
    pub(in crate::user_config) status_words: StatusWordOverrides,
}

/// Default UI configuration with all values required.
///
/// This is parsed from the embedded default user config TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct DefaultUiConfig {
    easy: bool,
    display: DisplayMode,
    traceback_style: TracebackStyle,
    status_words: StatusWordOverrides,
}

/// Resolved UI configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UiConfig {
    /// Whether to use the easy reporter.
    pub easy: bool,

    /// How tests are laid out while the run is in progress.
    pub display: DisplayMode,

    /// How failure details are rendered.
    pub traceback_style: TracebackStyle,

    /// Replacement status words.
    pub status_words: StatusWordOverrides,
}

impl UiConfig {
    /// Resolves the UI config: user values win over defaults.
    pub(in crate::user_config) fn resolve(
        default_config: &DefaultUiConfig,
        user_config: Option<&DeserializedUiConfig>,
    ) -> Self {
        let Some(user_config) = user_config else {
            return Self {
                easy: default_config.easy,
                display: default_config.display,
                traceback_style: default_config.traceback_style,
                status_words: default_config.status_words.clone(),
            };
        };

        let user_words = &user_config.status_words;
        let default_words = &default_config.status_words;
        let pick = |user: &Option<String>, default: &Option<String>| {
            user.as_ref().or(default.as_ref()).cloned()
        };

        Self {
            easy: user_config.easy.unwrap_or(default_config.easy),
            display: user_config.display.unwrap_or(default_config.display),
            traceback_style: user_config
                .traceback_style
                .unwrap_or(default_config.traceback_style),
            status_words: StatusWordOverrides {
                passed: pick(&user_words.passed, &default_words.passed),
                failed: pick(&user_words.failed, &default_words.failed),
                skipped: pick(&user_words.skipped, &default_words.skipped),
                error: pick(&user_words.error, &default_words.error),
            },
        }
    }
}
