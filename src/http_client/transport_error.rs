use crate::prelude::*;

#[derive(Debug, PartialEq, Eq, Clone, ThisError)]
pub enum TransportError {
    #[error("Unsupported HTTP method '{method}'")]
    InvalidMethod { method: String },

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid proxy URL '{url}': {reason}")]
    InvalidProxy { url: String, reason: String },

    #[error("Failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },

    #[error(
        "Request failed with code '{:?}', underlying error: '{}'",
        status_code,
        underlying_error
    )]
    RequestFailed {
        status_code: Option<u16>,
        underlying_error: String,
    },

    #[error("Failed to read HTTP response body: {reason}")]
    BodyRead { reason: String },
}
