//! Tracing setup.
//!
//! The terminal belongs to the UI, so logs never go to stdout. They are
//! appended to a file when one is configured and discarded otherwise.
//! The filter comes from `RTCDBG_LOG` (default `info`).

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG_FILTER: &str = "RTCDBG_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Later calls are ignored.
///
/// Returns an error only when the log file cannot be opened.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::sink)
            .try_init();
        return Ok(());
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}
