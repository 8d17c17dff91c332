//! Logging configuration. Logging goes through the tracing subsystem; the
//! clap group below is flattened into the top-level CLI so every subcommand
//! carries the same `--log-level` / `--log-path` surface.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Args)]
#[group(id = "logging")]
pub struct Options {
    /// Optional path to write logs to. If set, logs roll over based on the
    /// chosen `log_rotation` policy, which defaults to daily. Logs are
    /// written to `cdc-bench.log` within this path.
    #[arg(long, env = "LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// Log rotation to use if a log file is set. Does nothing if no log
    /// file is set.
    #[arg(long, env = "LOG_ROTATION", default_value = "daily", value_enum)]
    pub log_rotation: RotationCadence,

    /// Disable colors in all log output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log level filter for spans and events. The log level filter string
    /// is a comma separated list of directives; see
    /// [`tracing_subscriber::EnvFilter`] for the directive syntax.
    ///
    /// At `debug`, every SQL statement is logged before execution.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            log_path: None,
            log_rotation: RotationCadence::Daily,
            no_color: false,
            log_level: "info".to_owned(),
        }
    }
}

/// The rotation policy for log files
// This wrapper allows us to parse from a str since Rotation itself doesn't
// support that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum RotationCadence {
    /// Rotate logs daily
    Daily,
    /// Rotate logs hourly
    Hourly,
    /// Rotate logs minutely
    Minutely,
    /// Never rotate logs
    Never,
}

impl From<RotationCadence> for Rotation {
    fn from(value: RotationCadence) -> Self {
        match value {
            RotationCadence::Daily => Rotation::DAILY,
            RotationCadence::Hourly => Rotation::HOURLY,
            RotationCadence::Minutely => Rotation::MINUTELY,
            RotationCadence::Never => Rotation::NEVER,
        }
    }
}

impl Options {
    /// Initializes the global subscriber.
    ///
    /// The returned [`WorkerGuard`], when present, must be kept alive for
    /// the duration of the process; its `Drop` is what flushes buffered
    /// file logs before shutdown.
    pub fn init(&self, service_name: &str) -> anyhow::Result<Option<WorkerGuard>> {
        let filter = EnvFilter::try_new(&self.log_level)?;
        match &self.log_path {
            Some(path) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(
                    RollingFileAppender::new(
                        self.log_rotation.into(),
                        path,
                        format!("{service_name}.log"),
                    ),
                );
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().with_ansi(!self.no_color))
                    .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
                    .init();
                Ok(Some(guard))
            }
            None => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().with_ansi(!self.no_color))
                    .init();
                Ok(None)
            }
        }
    }
}
