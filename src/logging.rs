use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (RUST_LOG syntax)
pub const LOG_ENV: &str = "TODOS_LOG";

const DEFAULT_LEVEL: &str = "info";

fn env_filter() -> Result<EnvFilter> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LEVEL))
        .map_err(|e| anyhow!("invalid {LOG_ENV} log filter: {e}"))
}

/// Log to stderr, used by the one-shot CLI commands
pub fn init_stderr_logging() -> Result<()> {
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

/// Log to a file, used while the TUI owns the terminal
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}
