// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{ExpectedError, Result},
    output::{OutputContext, OutputOpts, OutputWriter, clap_styles},
};
use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use easyread_runner::{
    console::terminal_width,
    errors::ParseEventError,
    input::{EventFormat, EventReader},
    reporter::{DisplayMode, Reporter, ReporterBuilder, TestEvent, TracebackStyle},
    user_config::{UserConfig, UserConfigLocation, elements::UiConfig},
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};
use supports_color::Stream;
use tracing::{debug, warn};

/// Set by a controlling process on the secondary workers whose output it collects.
const WORKER_ENV: &str = "EASYREAD_WORKER_INPUT";

/// Renders test runs as readable, specification-style reports.
///
/// This binary should typically be invoked as `cargo easyread` (in which case
/// this message will not be seen), not `cargo-easyread`.
#[derive(Debug, Parser)]
#[command(
    version,
    bin_name = "cargo",
    styles = clap_styles::style(),
    max_term_width = 100
)]
pub struct CargoEasyreadApp {
    #[command(subcommand)]
    subcommand: EasyreadSubcommand,
}

impl CargoEasyreadApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        match &self.subcommand {
            EasyreadSubcommand::Easyread(app) => app.output.init(),
        }
    }

    /// Executes the app.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<()> {
        let EasyreadSubcommand::Easyread(app) = self.subcommand;
        app.exec(output, output_writer)
    }
}

#[derive(Debug, Subcommand)]
enum EasyreadSubcommand {
    /// Render a test run's event stream, optionally as an easy-to-read report.
    Easyread(Box<AppOpts>),
}

#[derive(Debug, Args)]
#[command(version)]
struct AppOpts {
    /// File to read test events from [default: standard input]
    ///
    /// Pass `-` to read from standard input explicitly.
    #[arg(value_name = "INPUT")]
    input: Option<Utf8PathBuf>,

    #[command(flatten)]
    reporter_opts: ReporterOpts,

    #[command(flatten)]
    input_opts: InputOpts,

    #[command(flatten)]
    output: OutputOpts,

    /// User config file [default: ~/.config/easyread/config.toml, or `none` to skip]
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "EASYREAD_USER_CONFIG_FILE"
    )]
    user_config_file: Option<String>,
}

impl AppOpts {
    fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<()> {
        let location = UserConfigLocation::from_cli_or_env(self.user_config_file.as_deref());
        let user_config = UserConfig::load(location)?;

        let mut builder = self.reporter_opts.to_builder(&user_config.ui);
        builder
            .set_worker(is_worker())
            .set_colorize(output.color.should_colorize(Stream::Stderr));
        match std::env::current_dir().map(Utf8PathBuf::try_from) {
            Ok(Ok(cwd)) => {
                builder.set_cwd(cwd);
            }
            Ok(Err(error)) => warn!("{error}, showing paths relative to the root directory"),
            Err(error) => warn!(
                "could not determine the current directory ({error}), \
                 showing paths relative to the root directory"
            ),
        }

        let events = self.open_input()?;
        let mut reporter = builder.build(output_writer.reporter_output());
        render(&mut reporter, events)?;

        if !reporter.stats().has_visible_reports() {
            Err(ExpectedError::NoTestsRun)
        } else if !reporter.is_success() {
            Err(ExpectedError::TestRunFailed)
        } else {
            Ok(())
        }
    }

    fn open_input(&self) -> Result<EventReader<Box<dyn BufRead>>> {
        let (name, reader): (String, Box<dyn BufRead>) = match &self.input {
            Some(path) if path.as_str() != "-" => {
                let file = File::open(path)
                    .map_err(|err| ExpectedError::input_open_error(path.clone(), err))?;
                (path.to_string(), Box::new(BufReader::new(file)))
            }
            _ => ("<stdin>".to_owned(), Box::new(io::stdin().lock())),
        };
        debug!("reading {} events from {name}", self.input_opts.format);

        Ok(EventReader::new(
            name,
            reader,
            self.input_opts.format.into(),
            self.input_opts.binary_id.clone(),
        ))
    }
}

fn render(
    reporter: &mut Reporter<'_>,
    events: impl Iterator<Item = Result<TestEvent, ParseEventError>>,
) -> Result<()> {
    for event in events {
        reporter.report_event(event?)?;
    }
    Ok(())
}

fn is_worker() -> bool {
    let worker = std::env::var_os(WORKER_ENV).is_some();
    if worker {
        debug!("{WORKER_ENV} is set, running as a worker");
    }
    worker
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Reporter options")]
struct ReporterOpts {
    /// Render tests as plain-language lines grouped by file and class
    #[arg(long, visible_alias = "rspecify", env = "EASYREAD_EASY")]
    easy: bool,

    /// Show one fully-qualified line per test
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Leave out file and class headers
    #[arg(short, long)]
    quiet: bool,

    /// Traceback style for failures
    #[arg(long = "tb", value_enum, value_name = "STYLE", env = "EASYREAD_TB")]
    traceback_style: Option<TracebackStyleOpt>,

    /// Terminal width used for separator lines [default: detected]
    #[arg(long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// Directory test node ids are relative to [default: announced by the run]
    #[arg(long, value_name = "DIR")]
    rootdir: Option<Utf8PathBuf>,
}

impl ReporterOpts {
    /// Combines these options with the user config. Options given here win.
    fn to_builder(&self, ui: &UiConfig) -> ReporterBuilder {
        let display_mode = if self.verbose > 0 || self.quiet {
            let verbosity = i8::try_from(self.verbose).unwrap_or(i8::MAX) - i8::from(self.quiet);
            DisplayMode::from_verbosity(verbosity)
        } else {
            ui.display
        };

        let mut builder = ReporterBuilder::default();
        builder
            .set_easy(self.easy || ui.easy)
            .set_display_mode(display_mode)
            .set_traceback_style(
                self.traceback_style
                    .map_or(ui.traceback_style, TracebackStyle::from),
            )
            .set_width(self.width.unwrap_or_else(terminal_width))
            .set_status_words(ui.status_words.clone());
        if let Some(rootdir) = &self.rootdir {
            builder.set_root(rootdir.clone());
        }
        builder
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Input options")]
struct InputOpts {
    /// Format of the event stream
    #[arg(long, value_enum, default_value_t, value_name = "FORMAT")]
    format: EventFormatOpt,

    /// Binary id prefixed to libtest test names [default: libtest]
    #[arg(long, value_name = "ID")]
    binary_id: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
enum EventFormatOpt {
    /// JSON lines of easyread events
    #[default]
    Native,

    /// libtest's `--format json` output
    LibtestJson,
}

impl From<EventFormatOpt> for EventFormat {
    fn from(opt: EventFormatOpt) -> Self {
        match opt {
            EventFormatOpt::Native => EventFormat::Native,
            EventFormatOpt::LibtestJson => EventFormat::LibtestJson,
        }
    }
}

impl std::fmt::Display for EventFormatOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        EventFormat::from(*self).fmt(f)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum TracebackStyleOpt {
    Auto,
    Long,
    Short,
    Line,
    Native,
    No,
}

impl From<TracebackStyleOpt> for TracebackStyle {
    fn from(opt: TracebackStyleOpt) -> Self {
        match opt {
            TracebackStyleOpt::Auto => TracebackStyle::Auto,
            TracebackStyleOpt::Long => TracebackStyle::Long,
            TracebackStyleOpt::Short => TracebackStyle::Short,
            TracebackStyleOpt::Line => TracebackStyle::Line,
            TracebackStyleOpt::Native => TracebackStyle::Native,
            TracebackStyleOpt::No => TracebackStyle::No,
        }
    }
}
