//! Logging setup
//!
//! Logging is off unless POSTSYNC_LOG holds a level (e.g. `debug`).
//! Scripted commands log to stderr; the TUI owns the terminal, so it
//! logs to a file instead.

use std::fs::{self, File};
use std::sync::Mutex;

use postsync_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log level
const LOG_ENV: &str = "POSTSYNC_LOG";

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("postsync_core={},postsync={}", level, level))
}

/// Log to stderr for one-shot commands
pub fn init_cli_logging() {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to a file while the TUI is running
pub fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&log_level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
