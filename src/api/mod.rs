mod api;
mod api_desc;
mod api_setters;
mod api_state;
mod deferred_fields;
mod diagnostics;
mod send;
mod successor;

pub use api::*;
pub use api_desc::*;
pub use diagnostics::*;
pub use successor::*;

pub(crate) use deferred_fields::*;
