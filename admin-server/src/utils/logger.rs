//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional file output
///
/// `RUST_LOG` takes precedence over `log_level` when set. When `log_dir`
/// exists, output goes to a daily rolling file instead of stdout.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: Option<bool>,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let writer = log_dir
        .map(Path::new)
        .filter(|p| p.exists())
        .and_then(|p| p.to_str())
        .map(|dir| tracing_appender::rolling::daily(dir, "admin-server"));

    // 各分支的 builder 类型不同，只能分别 init
    let result = match (json.unwrap_or(false), writer) {
        (true, Some(w)) => builder.json().with_writer(w).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(w)) => builder.with_ansi(false).with_writer(w).try_init(),
        (false, None) => builder.try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
