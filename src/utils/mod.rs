//! Shared helpers: Arrow cell access and logging setup

pub mod arrow_utils;
pub mod logging;

pub use logging::init_logging;
