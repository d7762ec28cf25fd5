mod api_result;
mod reply;

pub use api_result::*;
pub use reply::*;
