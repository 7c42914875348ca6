//! # Structured Logging Module
//!
//! Environment-aware structured logging to the console and, when a log
//! directory is configured, to a JSON file as well.

use crate::config::LoggingConfig;
use crate::error::ErrorCategory;
use chrono::Utc;
use std::process;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging. Safe to call more than once; only the first call wins.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = resolve_log_level(config, &environment);

        let console = if config.json {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .json()
                .with_filter(EnvFilter::new(&log_level))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(EnvFilter::new(&log_level))
                .boxed()
        };

        let mut log_file = None;
        let file_layer = config.log_dir.as_ref().and_then(|log_dir| {
            if let Err(e) = std::fs::create_dir_all(log_dir) {
                eprintln!("unable to create log directory {}: {e}", log_dir.display());
                return None;
            }

            let pid = process::id();
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let file_name = format!("{environment}.{pid}.{timestamp}.log");
            log_file = Some(log_dir.join(&file_name));

            let file_appender = tracing_appender::rolling::never(log_dir, file_name);
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            // The writer must outlive every span; the process owns it until exit.
            std::mem::forget(guard);

            Some(
                fmt::layer()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(false)
                    .json()
                    .with_filter(EnvFilter::new(&log_level)),
            )
        });

        let subscriber = tracing_subscriber::registry().with(console).with(file_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::debug!(
            pid = process::id(),
            environment = %environment,
            level = %log_level,
            log_file = ?log_file,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("SPIRIT_TOOL_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// `RUST_LOG` wins, then the configured level, then the environment default
fn resolve_log_level(config: &LoggingConfig, environment: &str) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|level| !level.trim().is_empty())
        .or_else(|| config.level.clone())
        .unwrap_or_else(|| get_log_level(environment).to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log a pipeline stage failure with its category
pub fn log_stage_error(stage: &str, category: ErrorCategory, error: &str) {
    tracing::error!(
        stage = %stage,
        category = %category,
        error = %error,
        timestamp = %Utc::now().to_rfc3339(),
        "Pipeline stage failed"
    );
}
