pub mod cli;
pub mod core;
pub mod format;
pub mod modes;
pub mod record;
pub mod routing;
pub mod setup_logger;
