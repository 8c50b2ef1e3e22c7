//! Logging Infrastructure
//!
//! Logs go to stderr so command output on stdout stays clean. With a log
//! directory they go to a daily rolling file instead.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `RUST_LOG` wins over `log_level` when set. The returned guard flushes
/// the file writer on drop and must be held for the life of the process.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "smart-shop");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            subscriber.with_writer(writer).with_ansi(false).init();
            return Some(guard);
        }
    }

    subscriber.with_writer(std::io::stderr).init();
    None
}
