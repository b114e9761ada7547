// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `cargo easyread` failures.
///
/// `cargo easyread` may fail for a variety of reasons. This structure documents the exit codes
/// that may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum EasyreadExitCode {}

impl EasyreadExitCode {
    /// No errors occurred, and every rendered test passed or was skipped.
    pub const OK: i32 = 0;

    /// The event stream contained no test reports, but no other errors occurred.
    pub const NO_TESTS_RUN: i32 = 4;

    /// A user issue happened while setting up an easyread invocation.
    pub const SETUP_ERROR: i32 = 96;

    /// One or more rendered tests failed or errored.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// The input event stream could not be read or decoded.
    pub const INPUT_PARSE_FAILED: i32 = 107;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
