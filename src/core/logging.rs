use crate::shared::paths::ensure_dir;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Targets that get their own daily log file. Everything else lands in `system.log`.
pub const LOG_TARGETS: [&str; 3] = ["todos", "http", "ui"];

/// Guards that must be kept alive to ensure logs are flushed
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create logs directory: {0}")]
    DirectoryError(#[from] std::io::Error),
    #[error("Failed to set global tracing subscriber: {0}")]
    SubscriberError(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Returns the routed target name when `target` is `name` or a `name::` child.
pub fn route_target<'a>(target: &str, names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    names.into_iter().find(|name| {
        target == *name
            || target
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}

/// Multi-target writer that routes logs to different files based on target
struct TargetWriter {
    writers: HashMap<&'static str, NonBlocking>,
    system_writer: NonBlocking,
}

impl<'a> MakeWriter<'a> for TargetWriter {
    type Writer = Box<dyn std::io::Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        Box::new(self.system_writer.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        route_target(meta.target(), self.writers.keys().copied())
            .and_then(|name| self.writers.get(name))
            .map(|writer| Box::new(writer.clone()) as Self::Writer)
            .unwrap_or_else(|| Box::new(self.system_writer.clone()))
    }
}

/// Initialize the logging system with per-target log files plus stderr.
pub fn init_logging(log_dir: &Path) -> Result<LoggingGuards, LoggingError> {
    ensure_dir(log_dir)?;

    let mut guards = Vec::new();
    let mut writers = HashMap::new();

    for target in LOG_TARGETS {
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{}.log", target));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        writers.insert(target, non_blocking);
        guards.push(guard);
    }

    let system_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "system.log");
    let (system_writer, system_guard) = tracing_appender::non_blocking(system_appender);
    guards.push(system_guard);

    let target_writer = TargetWriter {
        writers,
        system_writer,
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(target_writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(target: "system", "Logging initialized at {:?}", log_dir);

    Ok(LoggingGuards { _guards: guards })
}

/// Log line sent by the browser UI.
#[derive(Debug, Deserialize)]
pub struct FrontendLog {
    #[serde(default)]
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Re-emits a browser log line under the `ui` target.
/// Unknown levels are logged as info.
pub fn log_from_frontend(entry: &FrontendLog) {
    let ctx_str = entry
        .context
        .as_ref()
        .map(|c| format!(" {}", c))
        .unwrap_or_default();

    macro_rules! emit_log {
        ($level:ident) => {
            tracing::$level!(target: "ui", "{}{}", entry.message, ctx_str)
        };
    }

    match entry.level.to_ascii_lowercase().as_str() {
        "trace" => emit_log!(trace),
        "debug" => emit_log!(debug),
        "warn" => emit_log!(warn),
        "error" => emit_log!(error),
        _ => emit_log!(info),
    }
}
