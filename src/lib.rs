//! Build graphs of HTTP requests whose fields may depend on the result of the
//! previous step, then run them once as a synchronous chain or repeatedly as a
//! concurrent load generator.
//!
//! ```no_run
//! use apichain::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), ApiError> {
//! let login = Api::parse("https://example.com/login")?
//!     .body(json!({ "user": "alice" }))
//!     .callback(|response, _prev| {
//!         let token = response.map(|r| r.text()).unwrap_or_default();
//!         Ok(json!({ "token": token }))
//!     });
//! let profile = Api::parse("https://example.com/profile")?.path(Field::deferred(|prev| {
//!     let token = prev
//!         .and_then(|p| p.callback_result())
//!         .and_then(|v| v["token"].as_str())
//!         .unwrap_or_default();
//!     Ok(format!("/profile/{token}"))
//! }));
//! login.then(profile).send()?;
//! # Ok(())
//! # }
//! ```

mod api;
mod api_error;
mod codec;
mod config;
mod descriptors;
mod envelope;
mod field;
mod http_client;
mod parallel;

pub use api::*;
pub use api_error::*;
pub use codec::*;
pub use config::*;
pub use descriptors::*;
pub use envelope::*;
pub use field::*;
pub use http_client::*;
pub use parallel::*;

pub mod prelude {
    pub use crate::api::*;
    pub use crate::api_error::*;
    pub use crate::codec::*;
    pub use crate::config::*;
    pub use crate::descriptors::*;
    pub use crate::envelope::*;
    pub use crate::field::*;
    pub use crate::http_client::*;
    pub use crate::parallel::*;

    pub(crate) use serde::{Deserialize, Serialize};
    pub(crate) use serde_json::{Map, Value};
    pub(crate) use std::collections::{BTreeMap, HashMap};
    pub(crate) use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
    pub(crate) use std::time::Duration;
    pub(crate) use thiserror::Error as ThisError;
    pub(crate) use tracing::{debug, info, warn};
}
