//! Logging Infrastructure
//!
//! Structured logging setup for development and production:
//! - Console output (pretty or JSON)
//! - Optional daily rotating application logs
//! - Optional daily rotating security logs (`target: "security"`)

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Initialize the logger (console only, `info` unless `RUST_LOG` says otherwise)
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"), overridden by `RUST_LOG`
/// * `json_format` - JSON console output (production) or pretty output (development)
/// * `log_dir` - Optional directory for file logging; `app/` and `security/`
///   subdirectories are created inside it
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// bakery_server::init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// bakery_server::init_logger_with_file("info", true, Some("./data/logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Console layer
    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let (app_layer, security_layer) = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            let app_log_dir = log_dir.join("app");
            let security_log_dir = log_dir.join("security");
            fs::create_dir_all(&app_log_dir)?;
            fs::create_dir_all(&security_log_dir)?;

            // Application logs: everything except security events
            let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
            let app_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "security"
                }));

            // Security logs: auth failures and similar events
            let security_log =
                RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");
            let security_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_writer(std::sync::Mutex::new(security_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "security"
                }));

            (Some(app_layer), Some(security_layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(app_layer)
        .with(security_layer)
        .try_init()?;

    Ok(())
}
