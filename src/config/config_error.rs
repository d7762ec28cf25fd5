use crate::prelude::*;
use std::path::PathBuf;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to parse inline config: {0}")]
    ParseInlineFailed(toml::de::Error),
}
