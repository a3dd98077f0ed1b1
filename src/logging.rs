//! File logging
//!
//! The terminal is owned by the UI, so log records go to a file under the
//! user cache directory. The filter comes from `RUST_LOG`, defaulting to
//! `info`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

const LOG_FILE: &str = "search-suggest.log";

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("search-suggest").join(LOG_FILE))
}

/// Install the global logger writing to `path`
///
/// Logging is best effort: any failure leaves the process without a logger.
pub fn init(path: &Path) -> bool {
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return false;
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .is_ok()
}
