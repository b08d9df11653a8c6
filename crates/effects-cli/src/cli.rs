//! CLI argument definitions for the effect plot tool.

use std::path::PathBuf;

use std::io::{self, IsTerminal};

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use effects_cli::logging::{LogConfig, LogFormat};
use effects_model::GroupKey;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "effects-plot",
    version,
    about = "Lay out item effect estimates as overview and forest plots",
    long_about = "Lay out item effect estimates as overview and forest plots.\n\n\
                  Reads regression outputs exported as CSV, gates items by sample\n\
                  support, and prints pixel layouts as tables or JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
}

impl Cli {
    /// Logging setup implied by the global flags.
    ///
    /// `--log-level` wins over `-v`/`-q`, and either one turns off `RUST_LOG`.
    /// With `--color auto`, ANSI output needs a terminal on stderr and no
    /// log file.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            with_ansi,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the selectable character and star combinations.
    Candidates(InputArgs),

    /// Lay out the overview plot.
    Overview(OverviewArgs),

    /// Lay out the forest plot for one group.
    Detail(DetailArgs),
}

#[derive(Args, Clone)]
pub struct InputArgs {
    /// CSV files or directories of CSV files holding effect tables.
    #[arg(long = "data", value_name = "PATH", num_args = 1.., required = true)]
    pub data: Vec<PathBuf>,

    /// JSON config with gate thresholds, targets and plot domain.
    #[arg(long = "config", value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Character cost table (comma, semicolon or tab separated).
    #[arg(long = "costs", value_name = "CSV")]
    pub costs: Option<PathBuf>,
}

#[derive(Args)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Row key such as `TFT15_Ashe__S2`; repeat for more rows. Defaults to
    /// the configured targets.
    #[arg(long = "select", value_name = "KEY")]
    pub select: Vec<GroupKey>,

    /// Plot width in pixels.
    #[arg(long = "width", value_name = "PX", default_value_t = 1000)]
    pub width: u32,

    /// Print the layout as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct DetailArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Group key such as `TFT15_KaiSa__S2`.
    #[arg(long = "key", value_name = "KEY")]
    pub key: GroupKey,

    /// Plot width in pixels.
    #[arg(long = "width", value_name = "PX", default_value_t = 1000)]
    pub width: u32,

    /// Print the layout as JSON.
    #[arg(long = "json")]
    pub json: bool,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
