pub mod config;
pub mod error;

pub use config::{Configuration, LoggingConfig, Mode};
pub use error::{SimError, SimResult};
