use std::path::Path;

use clap::ValueEnum;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    prelude::*,
};

use crate::Cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Installs the global subscriber writing to stderr or `--log-file`. The
/// returned guard must outlive the command.
pub fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let level = cli.log_level.as_tracing_level();
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let (writer, guard) = match cli.log_file.as_deref() {
        Some(path) => {
            let (writer, guard) = file_writer(path);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(guard.is_none())
        .with_span_events(FmtSpan::CLOSE);
    let subscriber = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        subscriber.with(layer.json()).init();
    } else {
        subscriber.with(layer).init();
    }

    guard
}

fn file_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let parent = path.parent().unwrap_or(Path::new("."));
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("hoistwalk.log");

    tracing_appender::non_blocking(tracing_appender::rolling::never(parent, filename))
}
