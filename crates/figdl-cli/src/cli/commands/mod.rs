//! CLI command handlers.

mod harvest;
mod show_config;

pub use harvest::run_harvest;
pub use show_config::run_show_config;
