//! CLI argument definitions for `tuma`.

use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;
use tuma_predef::LorentzColumns;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "tuma",
    version,
    about = "Tuple maker - assemble table rows from named producers",
    long_about = "Assemble table rows from named producers.\n\n\
                  A row is committed only once every producer has either been\n\
                  filled or explicitly cleared."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v info, -vv debug, -vvv trace, -q errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path of each log event.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

impl Cli {
    /// Logging configuration from the global flags.
    ///
    /// `--log-level` wins over `-v`/`-q`; either one disables `RUST_LOG`.
    /// With `--color auto`, ANSI is used only on an interactive stderr.
    pub fn log_config(&self, stderr_is_terminal: bool) -> LogConfig {
        let level_filter = match self.log_level {
            Some(LogLevelArg::Error) => LevelFilter::ERROR,
            Some(LogLevelArg::Warn) => LevelFilter::WARN,
            Some(LogLevelArg::Info) => LevelFilter::INFO,
            Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
            Some(LogLevelArg::Trace) => LevelFilter::TRACE,
            None => self.verbosity.tracing_level_filter(),
        };
        let format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && stderr_is_terminal,
        };
        LogConfig {
            level_filter,
            use_env_filter: !(self.verbosity.is_present() || self.log_level.is_some()),
            with_timestamps: self.log_timestamps,
            with_target: self.log_target,
            with_ansi,
            format,
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill two four-vector tracks for a few rows and show the table.
    Example(ExampleArgs),

    /// List the columns a four-vector track would declare.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct ExampleArgs {
    /// Number of rows with both tracks filled, before the closing row.
    #[arg(long = "rows", default_value_t = 3)]
    pub rows: u32,

    /// Store Theta and Phi in degrees.
    #[arg(long = "degrees")]
    pub degrees: bool,

    /// Skip incomplete rows with a warning instead of failing.
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Do not clear the second track on the closing row.
    ///
    /// The closing row is then incomplete: the run fails, or with
    /// `--lenient` the row is skipped.
    #[arg(long = "skip-clear")]
    pub skip_clear: bool,

    /// Write the table to this file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Format of the `--output` file.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Do not print the rows.
    #[arg(long = "no-show")]
    pub no_show: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Producer name used as the column prefix.
    #[arg(long = "name", default_value = "p1")]
    pub name: String,

    /// Comma-separated column groups (E, M, P, Theta, CosTheta, Phi, Y, Pt, Pv, Beta) or "all".
    #[arg(long = "select", value_name = "GROUPS", default_value = "all")]
    pub select: LorentzColumns,

    /// Include the candidate vertex columns R and Z.
    #[arg(long = "vertex")]
    pub vertex: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
