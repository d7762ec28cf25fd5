mod chain_config;
mod config_error;

pub use chain_config::*;
pub use config_error::*;
