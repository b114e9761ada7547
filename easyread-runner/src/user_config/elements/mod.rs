// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User config elements.

mod ui;

pub use ui::*;
