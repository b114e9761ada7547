// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scenario tests that replay recorded event streams through the reporter.

mod fixtures;
mod properties;
mod scenarios;
