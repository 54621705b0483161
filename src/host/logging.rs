//! File logging. The terminal belongs to the UI, so log output goes to a
//! file instead of stderr.

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

/// Overrides where the log file is written.
pub const LOG_PATH_ENV: &str = "DINO_JOCKEY_LOG";

pub fn log_path() -> PathBuf {
    env::var_os(LOG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("dino-jockey.log"))
}

/// Install `env_logger` appending to [`log_path`]. Filter with `RUST_LOG`.
pub fn init() -> io::Result<PathBuf> {
    let path = log_path();
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(path)
}
