//! Logging setup and standardized log lines
//!
//! The crate logs through the `log` facade; hosts install `env_logger` once
//! with [`init_logging`].

pub mod log;

pub use self::log::{log_assessment, log_operation_start, log_records_loaded};

/// Install `env_logger`, honouring `RUST_LOG` and falling back to `default_filter`
///
/// Calling it again is a no-op, so tests and hosts can both call it.
pub fn init_logging(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}
