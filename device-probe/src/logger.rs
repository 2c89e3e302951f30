//! Logging setup for the probe.
//!
//! Logs go to stderr so stdout carries only the probe output.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional daily rolling file output
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "device-probe");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("Log directory {} does not exist, logging to stderr", dir);
    }

    subscriber.with_writer(std::io::stderr).init();
}
