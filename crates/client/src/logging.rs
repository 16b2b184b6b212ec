use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;

pub const LOG_LEVEL_ENV: &str = "ROBORALLY_LOG_LEVEL";

pub fn log_level_from(value: Option<&str>) -> Level {
    value
        .and_then(|raw| Level::from_str(raw.trim()).ok())
        .unwrap_or(Level::INFO)
}

/// Sends log output to a file. The terminal belongs to the UI while it runs.
pub fn init_tracing(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = log_level_from(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    tracing::info!(path = %path.display(), %level, "logging started");
    Ok(())
}
