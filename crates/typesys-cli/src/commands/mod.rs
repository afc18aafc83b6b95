//! Command implementations.

pub mod check;
pub mod config;
pub mod show;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::show::execute_show;
