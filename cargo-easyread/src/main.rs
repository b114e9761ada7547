// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use cargo_easyread::{CargoEasyreadApp, OutputWriter};
use clap::Parser;
use color_eyre::Result;
use easyread_metadata::EasyreadExitCode;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = enable_ansi_support::enable_ansi_support();

    let app = CargoEasyreadApp::parse();
    let output = app.init_output();

    match app.exec(output, &mut OutputWriter::default()) {
        Ok(()) => std::process::exit(EasyreadExitCode::OK),
        Err(error) => {
            error.display_to_stderr(&output.stderr_styles());
            std::process::exit(error.process_exit_code())
        }
    }
}
