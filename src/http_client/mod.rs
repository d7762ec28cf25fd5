mod network_request;
mod network_response;
mod reqwest_transport;
mod transport;
mod transport_config;
mod transport_error;

pub use network_request::*;
pub use network_response::*;
pub use reqwest_transport::*;
pub use transport::*;
pub use transport_config::*;
pub use transport_error::*;
