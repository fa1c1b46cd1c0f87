//! Logger setup for the console shell.

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`. `RUST_LOG`, when set, overrides
/// `level`. Calling this more than once keeps the first logger.
pub fn init_logger(level: LevelFilter) {
    let _ = Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
