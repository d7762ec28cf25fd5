use crate::prelude::*;

/// Error type returned by user supplied resolvers, hooks and callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error(transparent)]
    Transport {
        #[from]
        error: TransportError,
    },

    #[error("Unable to JSON serialize request body: {error}")]
    Serialization {
        #[from]
        error: serde_json::Error,
    },

    #[error("Unable to decompose URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Deferred resolver for field '{field}' failed: {source}")]
    Resolver {
        field: &'static str,
        source: BoxError,
    },

    #[error("Pre-dispatch hook failed: {source}")]
    BeforeSend { source: BoxError },

    #[error("Response callback failed: {source}")]
    Callback { source: BoxError },

    #[error("Fan-out member #{index} returned a callback result which is not a JSON object: {found}")]
    FanOutMerge { index: usize, found: Value },

    #[error("Envelope carries no single HTTP response")]
    NoResponse,

    #[error("Unable to JSON deserialize HTTP response body: {error}")]
    ResponseNotJson { error: serde_json::Error },

    #[error("Dispatch worker panicked: {reason}")]
    WorkerPanicked { reason: String },

    #[error("Failed to start dispatch runtime: {reason}")]
    Runtime { reason: String },
}
